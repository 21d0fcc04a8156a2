//! Word-by-word frame stream for the typewriter render.
//!
//! `Typewriter` turns a response body into a lazy sequence of cumulative
//! partial strings: one frame per whitespace word, plus one frame per line
//! break. The consumer decides pacing and the cursor glyph; this iterator
//! only produces text. The last frame is the full accumulated body -- each
//! line's words joined with trailing single spaces, every line
//! newline-terminated -- and is the exact form signal highlighting is
//! applied to.

/// Iterator over cumulative typewriter frames.
pub struct Typewriter<'a> {
    lines: std::str::Split<'a, char>,
    words: Option<std::str::SplitWhitespace<'a>>,
    acc: String,
}

impl<'a> Typewriter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n'),
            words: None,
            acc: String::with_capacity(text.len() + 8),
        }
    }
}

impl Iterator for Typewriter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(words) = self.words.as_mut() {
                match words.next() {
                    Some(word) => {
                        self.acc.push_str(word);
                        self.acc.push(' ');
                    }
                    None => {
                        // Line exhausted; the break gets its own frame.
                        self.words = None;
                        self.acc.push('\n');
                    }
                }
                return Some(self.acc.clone());
            }
            let line = self.lines.next()?;
            self.words = Some(line.split_whitespace());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_per_word_plus_line_breaks() {
        let frames: Vec<String> = Typewriter::new("BUY AAPL today\nHOLD cash").collect();
        // 5 words + 2 line breaks
        assert_eq!(frames.len(), 7);
    }

    #[test]
    fn test_frames_are_cumulative() {
        let frames: Vec<String> = Typewriter::new("one two three").collect();
        for pair in frames.windows(2) {
            assert!(pair[1].starts_with(pair[0].as_str()));
        }
        assert_eq!(frames[0], "one ");
        assert_eq!(frames[1], "one two ");
    }

    #[test]
    fn test_final_frame_is_full_accumulated_text() {
        let frames: Vec<String> = Typewriter::new("BUY now\nSELL later").collect();
        assert_eq!(frames.last().unwrap(), "BUY now \nSELL later \n");
    }

    #[test]
    fn test_preserves_blank_lines() {
        let frames: Vec<String> = Typewriter::new("top\n\nbottom").collect();
        // 2 words + 3 line breaks
        assert_eq!(frames.len(), 5);
        assert_eq!(frames.last().unwrap(), "top \n\nbottom \n");
    }

    #[test]
    fn test_empty_input_yields_single_newline_frame() {
        let frames: Vec<String> = Typewriter::new("").collect();
        assert_eq!(frames, vec!["\n".to_string()]);
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        let frames: Vec<String> = Typewriter::new("spaced   out\twords").collect();
        assert_eq!(frames.last().unwrap(), "spaced out words \n");
    }
}
