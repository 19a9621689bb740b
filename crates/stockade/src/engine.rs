use chrono::format::{Item, StrftimeItems};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    rand::RandSource,
    seq::SequenceSource,
    time::TimeSource,
    token::{TokenKind, replace_plain, replace_with_arg},
};

/// Uppercase letters and digits, the alphabet of `RANDOM20`/`RANDOM32`.
const ALPHANUMERIC: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Expands custom id format templates into concrete identifiers.
///
/// The engine owns no state beyond its three injected capabilities: a
/// [`TimeSource`] for the date-bearing tokens, a [`RandSource`] for the
/// `RANDOM*`/`GUID*` tokens, and a [`SequenceSource`] for the `SEQ` family.
/// Expansion is a fixed-order series of per-kind replacement passes (see
/// [`TokenKind::ALL`]); everything that matches no token, including
/// unrecognized `{...}` content, is copied through verbatim.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use stockade::{FixedSequence, IdEngine, RandSource, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> DateTime<Utc> {
///         Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
///     }
/// }
///
/// struct ZeroRand;
/// impl RandSource for ZeroRand {
///     fn rand(&self) -> u64 {
///         0
///     }
/// }
///
/// let engine = IdEngine::new(FixedTime, ZeroRand, FixedSequence::new(1));
/// assert_eq!(engine.expand("{YEAR}-{MONTH}-{DAY}"), "2024-03-05");
/// assert_eq!(engine.expand("ITEM-{SEQ}"), "ITEM-001");
/// assert_eq!(engine.expand("prefix-{UNKNOWN}-suffix"), "prefix-{UNKNOWN}-suffix");
/// ```
///
/// [`TokenKind::ALL`]: crate::TokenKind::ALL
pub struct IdEngine<T, R, S> {
    time: T,
    rng: R,
    seq: S,
}

impl<T, R, S> IdEngine<T, R, S>
where
    T: TimeSource,
    R: RandSource,
    S: SequenceSource,
{
    /// Creates a new engine from its three capability sources.
    pub const fn new(time: T, rng: R, seq: S) -> Self {
        Self { time, rng, seq }
    }

    /// Expands `format` into a concrete identifier.
    ///
    /// Never fails: token occurrences whose argument is rejected (a malformed
    /// `DATE:` pattern, a non-numeric `SEQ:` width) stay in the output
    /// verbatim, as does any unrecognized `{...}` content. An empty format
    /// falls back to a fresh random 8-character identifier.
    ///
    /// The produced id is **not** checked for uniqueness; that is the
    /// allocator's job.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn expand(&self, format: &str) -> String {
        self.run(format, true).0
    }

    /// Reports whether `format` expands cleanly.
    ///
    /// `false` exactly when some `{DATE:<fmt>}` argument is rejected by the
    /// strftime parser. Unrecognized tokens are fine (they pass through), so
    /// almost every string validates. Validation never draws a sequence
    /// number, so calling it repeatedly does not advance any counter.
    pub fn validate(&self, format: &str) -> bool {
        self.run(format, false).1
    }

    /// Expands `format` for UI display before the format is persisted.
    ///
    /// Identical to [`expand`](Self::expand); the owning inventory plays no
    /// role in expansion, so a preview engine only needs representative
    /// sources.
    pub fn preview(&self, format: &str) -> String {
        self.expand(format)
    }

    /// All passes in their defined order. `draw_seq` suppresses the sequence
    /// draw for validation; the pre-seeded zero is never observable because
    /// validation discards the expansion.
    fn run(&self, format: &str, draw_seq: bool) -> (String, bool) {
        if format.is_empty() {
            return (self.guid()[..8].to_owned(), true);
        }

        let now = self.time.now();
        let mut valid = true;
        // One sequence value per expansion, drawn lazily on the first SEQ
        // token and shared by the rest.
        let mut seq: Option<u64> = if draw_seq { None } else { Some(0) };

        let mut out = format.to_owned();
        for kind in TokenKind::ALL {
            let keyword = kind.keyword();
            out = match kind {
                TokenKind::Text => replace_with_arg(&out, keyword, |arg| Some(arg.to_owned())),
                TokenKind::Random6 => replace_plain(&out, keyword, || self.random_decimal(6)),
                TokenKind::Random9 => replace_plain(&out, keyword, || self.random_decimal(9)),
                TokenKind::Random20 => {
                    replace_plain(&out, keyword, || self.random_alphanumeric(20))
                }
                TokenKind::Random32 => {
                    replace_plain(&out, keyword, || self.random_alphanumeric(32))
                }
                TokenKind::Guid => replace_plain(&out, keyword, || self.guid()),
                TokenKind::Guid8 => replace_plain(&out, keyword, || self.guid()[..8].to_owned()),
                TokenKind::DateFmt => replace_with_arg(&out, keyword, |arg| {
                    if strftime_is_valid(arg) {
                        Some(now.format(arg).to_string())
                    } else {
                        valid = false;
                        None
                    }
                }),
                TokenKind::Date => {
                    replace_plain(&out, keyword, || now.format("%Y%m%d").to_string())
                }
                TokenKind::Time => {
                    replace_plain(&out, keyword, || now.format("%H%M%S").to_string())
                }
                TokenKind::Year => replace_plain(&out, keyword, || now.format("%Y").to_string()),
                TokenKind::Month => replace_plain(&out, keyword, || now.format("%m").to_string()),
                TokenKind::Day => replace_plain(&out, keyword, || now.format("%d").to_string()),
                TokenKind::SeqWidth => replace_with_arg(&out, keyword, |arg| {
                    let width: usize = arg.parse().ok()?;
                    Some(zero_pad(self.seq_value(&mut seq), width))
                }),
                TokenKind::Seq => {
                    replace_plain(&out, keyword, || zero_pad(self.seq_value(&mut seq), 3))
                }
            };
        }

        (out, valid)
    }

    fn seq_value(&self, slot: &mut Option<u64>) -> u64 {
        *slot.get_or_insert_with(|| self.seq.next_seq())
    }

    /// Zero-padded decimal in `[0, 10^digits)`.
    fn random_decimal(&self, digits: u32) -> String {
        let value = self.rng.rand() % 10u64.pow(digits);
        zero_pad(value, digits as usize)
    }

    fn random_alphanumeric(&self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHANUMERIC[(self.rng.rand() % 36) as usize] as char)
            .collect()
    }

    /// 32 uppercase hex digits of a fresh guid built from drawn randomness.
    fn guid(&self) -> String {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.rng.rand().to_be_bytes());
        bytes[8..].copy_from_slice(&self.rng.rand().to_be_bytes());
        let guid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        let mut buf = uuid::Uuid::encode_buffer();
        guid.simple().encode_upper(&mut buf).to_owned()
    }
}

impl Default for IdEngine<crate::SystemClock, crate::ThreadRandom, crate::AtomicSequence> {
    /// An engine over the system clock, the thread-local RNG, and a fresh
    /// in-memory sequence starting at 1.
    fn default() -> Self {
        Self::new(
            crate::SystemClock,
            crate::ThreadRandom,
            crate::AtomicSequence::new(),
        )
    }
}

fn zero_pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Whether `fmt` parses as a strftime pattern. Literal text is always valid;
/// only `%`-escape sequences can be rejected.
fn strftime_is_valid(fmt: &str) -> bool {
    StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}
