/// The fixed vocabulary of `{...}` placeholders recognized in a custom id
/// format, listed in replacement-pass order.
///
/// Expansion runs one pass per kind over the whole working string, in the
/// order of [`TokenKind::ALL`]. The order is observable: a `TEXT:` payload
/// that itself contains `{YEAR}` is picked up by the later `YEAR` pass.
/// Anything between braces that matches no kind is not an error; it passes
/// through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// `{TEXT:<literal>}` — emits the literal payload.
    Text,
    /// `{RANDOM6}` — zero-padded random decimal, 6 digits.
    Random6,
    /// `{RANDOM9}` — zero-padded random decimal, 9 digits.
    Random9,
    /// `{RANDOM20}` — random uppercase alphanumeric, 20 characters.
    Random20,
    /// `{RANDOM32}` — random uppercase alphanumeric, 32 characters.
    Random32,
    /// `{GUID}` — 32 uppercase hex digits of a fresh guid.
    Guid,
    /// `{GUID8}` — first 8 hex digits of a fresh guid, uppercase.
    Guid8,
    /// `{DATE:<fmt>}` — current UTC instant formatted per a strftime pattern.
    DateFmt,
    /// `{DATE}` — current UTC date as `YYYYMMDD`.
    Date,
    /// `{TIME}` — current UTC time as `HHMMSS`.
    Time,
    /// `{YEAR}` — current UTC year, 4 digits.
    Year,
    /// `{MONTH}` — current UTC month, zero-padded to 2 digits.
    Month,
    /// `{DAY}` — current UTC day, zero-padded to 2 digits.
    Day,
    /// `{SEQ:<width>}` — sequence number, zero-padded to `<width>` digits.
    SeqWidth,
    /// `{SEQ}` — sequence number, zero-padded to 3 digits.
    Seq,
}

impl TokenKind {
    /// Every kind, in the order its replacement pass runs.
    pub const ALL: [TokenKind; 15] = [
        TokenKind::Text,
        TokenKind::Random6,
        TokenKind::Random9,
        TokenKind::Random20,
        TokenKind::Random32,
        TokenKind::Guid,
        TokenKind::Guid8,
        TokenKind::DateFmt,
        TokenKind::Date,
        TokenKind::Time,
        TokenKind::Year,
        TokenKind::Month,
        TokenKind::Day,
        TokenKind::SeqWidth,
        TokenKind::Seq,
    ];

    /// The keyword as it appears between braces.
    pub const fn keyword(self) -> &'static str {
        match self {
            TokenKind::Text => "TEXT",
            TokenKind::Random6 => "RANDOM6",
            TokenKind::Random9 => "RANDOM9",
            TokenKind::Random20 => "RANDOM20",
            TokenKind::Random32 => "RANDOM32",
            TokenKind::Guid => "GUID",
            TokenKind::Guid8 => "GUID8",
            TokenKind::DateFmt | TokenKind::Date => "DATE",
            TokenKind::Time => "TIME",
            TokenKind::Year => "YEAR",
            TokenKind::Month => "MONTH",
            TokenKind::Day => "DAY",
            TokenKind::SeqWidth | TokenKind::Seq => "SEQ",
        }
    }

    /// Whether the keyword takes a `:<arg>` payload.
    pub const fn takes_arg(self) -> bool {
        matches!(self, TokenKind::Text | TokenKind::DateFmt | TokenKind::SeqWidth)
    }

    /// A short human-readable description, for format-builder UIs.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Text => "literal text",
            TokenKind::Random6 => "random 6-digit number",
            TokenKind::Random9 => "random 9-digit number",
            TokenKind::Random20 => "random 20-character string",
            TokenKind::Random32 => "random 32-character string",
            TokenKind::Guid => "globally unique identifier",
            TokenKind::Guid8 => "short guid (8 hex digits)",
            TokenKind::DateFmt => "date/time with a custom pattern",
            TokenKind::Date => "date as YYYYMMDD",
            TokenKind::Time => "time as HHMMSS",
            TokenKind::Year => "current year",
            TokenKind::Month => "current month",
            TokenKind::Day => "current day of month",
            TokenKind::SeqWidth => "sequence number with fixed width",
            TokenKind::Seq => "sequence number",
        }
    }
}

/// Replaces every `{keyword}` occurrence, invoking `emit` once per
/// occurrence.
pub(crate) fn replace_plain(input: &str, keyword: &str, mut emit: impl FnMut() -> String) -> String {
    let needle = format!("{{{keyword}}}");
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(&needle) {
        out.push_str(&rest[..pos]);
        out.push_str(&emit());
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}

/// Replaces every `{keyword:<arg>}` occurrence, where `<arg>` runs to the
/// first `}`. `emit` returns `None` to leave that occurrence in place
/// (malformed date pattern, non-numeric sequence width). An unterminated
/// `{keyword:` is not a token and passes through.
pub(crate) fn replace_with_arg(
    input: &str,
    keyword: &str,
    mut emit: impl FnMut(&str) -> Option<String>,
) -> String {
    let needle = format!("{{{keyword}:");
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(&needle) {
        let after = &rest[pos + needle.len()..];
        let Some(end) = after.find('}') else {
            break;
        };
        let arg = &after[..end];
        match emit(arg) {
            Some(expansion) => {
                out.push_str(&rest[..pos]);
                out.push_str(&expansion);
            }
            None => out.push_str(&rest[..pos + needle.len() + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_order_matches_pass_order() {
        // DATE:arg runs before DATE, SEQ:width before SEQ, and TEXT first.
        assert_eq!(TokenKind::ALL[0], TokenKind::Text);
        let date_fmt = TokenKind::ALL.iter().position(|k| *k == TokenKind::DateFmt);
        let date = TokenKind::ALL.iter().position(|k| *k == TokenKind::Date);
        assert!(date_fmt < date);
        let seq_width = TokenKind::ALL.iter().position(|k| *k == TokenKind::SeqWidth);
        let seq = TokenKind::ALL.iter().position(|k| *k == TokenKind::Seq);
        assert!(seq_width < seq);
        assert_eq!(TokenKind::ALL[14], TokenKind::Seq);
    }

    #[test]
    fn arg_kinds_are_flagged() {
        for kind in TokenKind::ALL {
            let expected = matches!(
                kind,
                TokenKind::Text | TokenKind::DateFmt | TokenKind::SeqWidth
            );
            assert_eq!(kind.takes_arg(), expected, "{kind:?}");
        }
    }

    #[test]
    fn replace_plain_hits_every_occurrence() {
        let mut n = 0;
        let out = replace_plain("a-{X}-b-{X}", "X", || {
            n += 1;
            n.to_string()
        });
        assert_eq!(out, "a-1-b-2");
    }

    #[test]
    fn replace_plain_leaves_other_braces_alone() {
        let out = replace_plain("{Y}-{X}", "X", || "1".into());
        assert_eq!(out, "{Y}-1");
    }

    #[test]
    fn replace_with_arg_captures_to_first_closing_brace() {
        let out = replace_with_arg("{T:a}b}", "T", |arg| Some(arg.to_uppercase()));
        assert_eq!(out, "Ab}");
    }

    #[test]
    fn replace_with_arg_keeps_rejected_tokens_verbatim() {
        let out = replace_with_arg("x{T:bad}y", "T", |_| None);
        assert_eq!(out, "x{T:bad}y");
    }

    #[test]
    fn unterminated_arg_token_passes_through() {
        let out = replace_with_arg("x{T:unclosed", "T", |arg| Some(arg.to_owned()));
        assert_eq!(out, "x{T:unclosed");
    }

    #[test]
    fn empty_arg_is_still_an_arg() {
        let out = replace_with_arg("{T:}", "T", |arg| Some(format!("[{arg}]")));
        assert_eq!(out, "[]");
    }
}
