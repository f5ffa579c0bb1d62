use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use encoding_rs::{CoderResult, Decoder, Encoding};

/// Bytes shown per hexdump line.
pub(crate) const HEXDUMP_WIDTH: usize = 16;

/// `YYYY-MM-DD HH:MM:SS` in local time.
pub(crate) fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// One hexdump line for a window of at most [`HEXDUMP_WIDTH`] bytes.
///
/// Missing columns of a short window are padded with blanks.
pub(crate) fn hexdump_line(window: &[u8]) -> String {
    let mut line = String::with_capacity(HEXDUMP_WIDTH * 5 + 4);
    for i in 0..HEXDUMP_WIDTH {
        if i == HEXDUMP_WIDTH / 2 {
            line.push_str("| ");
        }
        match window.get(i) {
            Some(byte) => {
                let _ = write!(line, "{byte:02X} ");
            }
            None => line.push_str("   "),
        }
    }
    line.push_str("| ");

    let rendered: Vec<String> = window
        .iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                char::from(b).to_string()
            } else {
                ".".to_string()
            }
        })
        .collect();
    line.push_str(&rendered.join(" "));
    line
}

/// Every charset `cat` can decode.
pub(crate) fn supported_charsets() -> Vec<&'static Encoding> {
    let mut charsets = vec![
        encoding_rs::BIG5,
        encoding_rs::EUC_JP,
        encoding_rs::EUC_KR,
        encoding_rs::GB18030,
        encoding_rs::GBK,
        encoding_rs::IBM866,
        encoding_rs::ISO_2022_JP,
        encoding_rs::ISO_8859_2,
        encoding_rs::ISO_8859_3,
        encoding_rs::ISO_8859_4,
        encoding_rs::ISO_8859_5,
        encoding_rs::ISO_8859_6,
        encoding_rs::ISO_8859_7,
        encoding_rs::ISO_8859_8,
        encoding_rs::ISO_8859_8_I,
        encoding_rs::ISO_8859_10,
        encoding_rs::ISO_8859_13,
        encoding_rs::ISO_8859_14,
        encoding_rs::ISO_8859_15,
        encoding_rs::ISO_8859_16,
        encoding_rs::KOI8_R,
        encoding_rs::KOI8_U,
        encoding_rs::MACINTOSH,
        encoding_rs::SHIFT_JIS,
        encoding_rs::UTF_16BE,
        encoding_rs::UTF_16LE,
        encoding_rs::UTF_8,
        encoding_rs::WINDOWS_874,
        encoding_rs::WINDOWS_1250,
        encoding_rs::WINDOWS_1251,
        encoding_rs::WINDOWS_1252,
        encoding_rs::WINDOWS_1253,
        encoding_rs::WINDOWS_1254,
        encoding_rs::WINDOWS_1255,
        encoding_rs::WINDOWS_1256,
        encoding_rs::WINDOWS_1257,
        encoding_rs::WINDOWS_1258,
        encoding_rs::X_MAC_CYRILLIC,
        encoding_rs::X_USER_DEFINED,
    ];
    charsets.sort_by_key(|c| c.name().to_ascii_lowercase());
    charsets
}

/// Resolve a charset by any of its labels, case-insensitively.
pub(crate) fn charset_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.as_bytes())
}

/// Decode `src` into `out`. Pass `last` on the final chunk so a dangling
/// partial sequence is flushed.
pub(crate) fn decode_chunk(decoder: &mut Decoder, mut src: &[u8], last: bool, out: &mut String) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() * 3 + 16);
        out.reserve(needed);
        let (result, read, _had_errors) = decoder.decode_to_string(src, out, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return,
            CoderResult::OutputFull => continue,
        }
    }
}
