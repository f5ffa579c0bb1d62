use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::local_fs::read_full;
use super::utils::{charset_for_label, decode_chunk, hexdump_line, supported_charsets, HEXDUMP_WIDTH};
use super::{io_failure, path_arg, split_args, usage_error, STREAM_CHUNK_SIZE};
use crate::error::ShellResult;
use crate::shell::{Environment, ShellStatus};

pub(crate) fn cmd_cat(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let parts = split_args(args);
    let (path, charset) = match parts.as_slice() {
        [path] => (*path, env.default_charset()),
        [path, label] => match charset_for_label(label) {
            Some(charset) => (*path, charset),
            None => {
                env.writeln(&format!("The charset {label} is not supported."))?;
                return Ok(ShellStatus::Continue);
            }
        },
        [] => return usage_error(env, "cat", "The cat command expects a file path."),
        _ => return usage_error(env, "cat", "The cat command expects one or two arguments."),
    };

    let path = Path::new(path);
    if !path.is_file() {
        env.writeln(&format!("{} is not an existing file.", path.display()))?;
        return Ok(ShellStatus::Continue);
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return io_failure(env, "cat", &e),
    };

    let mut decoder = charset.new_decoder_without_bom_handling();
    let mut buffer = [0u8; STREAM_CHUNK_SIZE];
    let mut text = String::new();
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                env.writeln("")?;
                return io_failure(env, "cat", &e);
            }
        };
        text.clear();
        decode_chunk(&mut decoder, &buffer[..n], false, &mut text);
        env.write(&text)?;
    }
    text.clear();
    decode_chunk(&mut decoder, &[], true, &mut text);
    env.write(&text)?;
    env.writeln("")?;

    Ok(ShellStatus::Continue)
}

pub(crate) fn cmd_hexdump(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let Some(path) = path_arg(args) else {
        return usage_error(env, "hexdump", "The hexdump command expects a file path.");
    };

    let path = Path::new(path);
    if !path.is_file() {
        env.writeln(&format!("{} is not an existing file.", path.display()))?;
        return Ok(ShellStatus::Continue);
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => return io_failure(env, "hexdump", &e),
    };

    let mut window = [0u8; HEXDUMP_WIDTH];
    loop {
        let n = match read_full(&mut file, &mut window) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => return io_failure(env, "hexdump", &e),
        };
        env.writeln(&hexdump_line(&window[..n]))?;
        if n < HEXDUMP_WIDTH {
            break;
        }
    }

    Ok(ShellStatus::Continue)
}

pub(crate) fn cmd_charsets(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    if !split_args(args).is_empty() {
        return usage_error(env, "charsets", "The charsets command takes no arguments.");
    }
    for charset in supported_charsets() {
        env.writeln(charset.name())?;
    }
    Ok(ShellStatus::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::environment;
    use std::fs;

    #[test]
    fn cat_writes_content_and_trailing_blank_line() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("hello.txt");
        fs::write(&file, "hello\nworld").unwrap();

        let (mut env, output) = environment("");
        let status = cmd_cat(&mut env, Some(file.to_str().unwrap())).unwrap();
        assert_eq!(status, ShellStatus::Continue);
        assert_eq!(output.contents(), "hello\nworld\n");
    }

    #[test]
    fn cat_roundtrips_through_named_charset() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("latin2.txt");
        let (bytes, _, _) = encoding_rs::ISO_8859_2.encode("Šđčćž and plain ASCII");
        fs::write(&file, &bytes).unwrap();

        let (mut env, output) = environment("");
        let args = format!("{} ISO-8859-2", file.display());
        cmd_cat(&mut env, Some(&args)).unwrap();

        let text = output.contents();
        let decoded = text.strip_suffix('\n').unwrap();
        let (reencoded, _, _) = encoding_rs::ISO_8859_2.encode(decoded);
        assert_eq!(reencoded.as_ref(), bytes.as_ref());
    }

    #[test]
    fn cat_roundtrips_large_utf8_across_chunks() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("big.txt");
        let content = "žabe i čvorci ".repeat(1000);
        fs::write(&file, &content).unwrap();

        let (mut env, output) = environment("");
        cmd_cat(&mut env, Some(file.to_str().unwrap())).unwrap();
        assert_eq!(output.contents(), format!("{content}\n"));
    }

    #[test]
    fn cat_rejects_unknown_charset() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let (mut env, output) = environment("");
        let args = format!("{} KLINGON-8", file.display());
        assert_eq!(cmd_cat(&mut env, Some(&args)).unwrap(), ShellStatus::Continue);
        assert_eq!(output.contents(), "The charset KLINGON-8 is not supported.\n");
    }

    #[test]
    fn cat_rejects_directory() {
        let temp = tempfile::tempdir().unwrap();
        let (mut env, output) = environment("");
        cmd_cat(&mut env, Some(temp.path().to_str().unwrap())).unwrap();
        assert!(output.contents().ends_with("is not an existing file.\n"));
    }

    #[test]
    fn cat_without_arguments_points_to_help() {
        let (mut env, output) = environment("");
        cmd_cat(&mut env, None).unwrap();
        assert_eq!(
            output.contents(),
            "The cat command expects a file path.\nSee help cat for more info.\n"
        );
    }

    #[test]
    fn hexdump_emits_one_line_per_sixteen_bytes() {
        let temp = tempfile::tempdir().unwrap();
        for len in [0usize, 1, 15, 16, 17, 32, 33] {
            let file = temp.path().join(format!("f{len}"));
            fs::write(&file, vec![b'a'; len]).unwrap();

            let (mut env, output) = environment("");
            cmd_hexdump(&mut env, Some(file.to_str().unwrap())).unwrap();
            assert_eq!(output.contents().lines().count(), len.div_ceil(16), "len {len}");
        }
    }

    #[test]
    fn hexdump_final_line_is_padded() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("data.bin");
        fs::write(&file, b"Hello, hexdump!\n\x01").unwrap();

        let (mut env, output) = environment("");
        cmd_hexdump(&mut env, Some(file.to_str().unwrap())).unwrap();

        let contents = output.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "48 65 6C 6C 6F 2C 20 68 | 65 78 64 75 6D 70 21 0A | H e l l o ,   h e x d u m p ! ."
        );
        assert_eq!(lines[1], format!("01 {}| {}| .", "   ".repeat(7), "   ".repeat(8)));
    }

    #[test]
    fn hexdump_rejects_missing_file() {
        let (mut env, output) = environment("");
        cmd_hexdump(&mut env, Some("/no/such/file/anywhere")).unwrap();
        assert_eq!(output.contents(), "/no/such/file/anywhere is not an existing file.\n");
    }

    #[test]
    fn charsets_lists_every_supported_name() {
        let (mut env, output) = environment("");
        cmd_charsets(&mut env, None).unwrap();
        let contents = output.contents();
        let names: Vec<_> = contents.lines().collect();
        assert_eq!(names.len(), supported_charsets().len());
        assert!(names.contains(&"UTF-8"));
    }
}
