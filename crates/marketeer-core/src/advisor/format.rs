//! Response formatting: emphasis stripping and trading-signal colors.
//!
//! Model output is treated as plain text. Markdown emphasis markers are
//! removed outright (no rendering), and the literal tokens BUY / SELL /
//! HOLD are wrapped in green / red / yellow ANSI styling. Stripping runs
//! once on the raw payload before the typewriter; highlighting runs once on
//! the fully accumulated text.

use console::Style;

/// Trading-signal keywords highlighted in the final render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Buy, Signal::Sell, Signal::Hold];

    /// The literal, case-sensitive token matched in model output.
    pub fn token(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }

    /// Styling for this signal. Forced so the output bytes do not depend
    /// on whether stdout is a terminal; the formatter is a pure transform.
    pub fn style(&self) -> Style {
        let style = match self {
            Signal::Buy => Style::new().green(),
            Signal::Sell => Style::new().red(),
            Signal::Hold => Style::new().yellow(),
        };
        style.force_styling(true)
    }

    /// The token wrapped in this signal's escape sequences.
    fn styled_token(&self) -> String {
        self.style().apply_to(self.token()).to_string()
    }
}

/// Remove markdown emphasis markers from model output.
///
/// Literal replacement of every `**` and triple-backtick sequence; no
/// markdown parsing, unmatched markers are removed all the same.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("```", "")
}

/// Wrap each occurrence of each signal token in its color styling.
///
/// Matching is literal, case-sensitive, and substring-based, so a token
/// embedded in a longer word is wrapped too. An occurrence that is already
/// surrounded by its own escape sequences is left untouched, which makes
/// the function idempotent.
pub fn highlight_signals(text: &str) -> String {
    let mut out = text.to_string();
    for signal in Signal::ALL {
        let styled = signal.styled_token();
        let Some((open, close)) = styled.split_once(signal.token()) else {
            continue;
        };
        out = wrap_token(&out, signal.token(), open, close);
    }
    out
}

/// Wrap every bare occurrence of `token` in `open`/`close`, skipping
/// occurrences that already carry them.
fn wrap_token(text: &str, token: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(at) = rest.find(token) {
        let (head, tail) = rest.split_at(at);
        let after = &tail[token.len()..];
        out.push_str(head);
        if head.ends_with(open) && after.starts_with(close) {
            out.push_str(token);
        } else {
            out.push_str(open);
            out.push_str(token);
            out.push_str(close);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(signal: Signal) -> String {
        signal.style().apply_to(signal.token()).to_string()
    }

    #[test]
    fn test_strip_emphasis_removes_markers() {
        let input = "**Strong BUY** on tech:\n```\nAAPL\n```";
        let stripped = strip_emphasis(input);
        assert!(!stripped.contains("**"));
        assert!(!stripped.contains("```"));
        assert!(stripped.contains("Strong BUY"));
        assert!(stripped.contains("AAPL"));
    }

    #[test]
    fn test_strip_emphasis_handles_unmatched_markers() {
        assert_eq!(strip_emphasis("**half open"), "half open");
        assert_eq!(strip_emphasis("plain text"), "plain text");
    }

    #[test]
    fn test_highlight_wraps_each_signal() {
        let out = highlight_signals("BUY AAPL, HOLD cash");
        assert!(out.contains(&styled(Signal::Buy)));
        assert!(out.contains(&styled(Signal::Hold)));
        assert!(!out.contains(&styled(Signal::Sell)));
    }

    #[test]
    fn test_highlight_uses_green_for_buy() {
        let out = highlight_signals("BUY");
        assert!(out.contains("\u{1b}[32m"));
    }

    #[test]
    fn test_highlight_wraps_every_occurrence() {
        let out = highlight_signals("SELL now, SELL later");
        let marker = styled(Signal::Sell);
        assert_eq!(out.matches(&marker).count(), 2);
    }

    #[test]
    fn test_highlight_is_case_sensitive() {
        let out = highlight_signals("buy low, sell high, hold steady");
        assert_eq!(out, "buy low, sell high, hold steady");
    }

    #[test]
    fn test_highlight_matches_inside_longer_words() {
        let out = highlight_signals("BUYBACK program");
        let marker = styled(Signal::Buy);
        assert!(out.starts_with(&marker));
        assert!(out.contains("BACK program"));
    }

    #[test]
    fn test_highlight_is_idempotent() {
        let once = highlight_signals("BUY AAPL\nSELL TSLA\nHOLD cash");
        let twice = highlight_signals(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_highlight_adjacent_tokens() {
        let once = highlight_signals("BUYBUY");
        let marker = styled(Signal::Buy);
        assert_eq!(once.matches(&marker).count(), 2);
        assert_eq!(highlight_signals(&once), once);
    }

    #[test]
    fn test_strip_then_highlight_leaves_no_emphasis() {
        let out = highlight_signals(&strip_emphasis("**BUY** the dip"));
        assert!(!out.contains("**"));
        assert!(out.contains(&styled(Signal::Buy)));
    }
}
