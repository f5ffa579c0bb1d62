use std::path::Path;

use super::local_fs::{local_copy, local_mkdir, local_readdir, same_file, walk, WalkEvent};
use super::utils::format_timestamp;
use super::{io_failure, path_arg, split_args, usage_error};
use crate::error::ShellResult;
use crate::shell::{Environment, ShellStatus};

pub(crate) fn cmd_ls(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let Some(path) = path_arg(args) else {
        return usage_error(env, "ls", "The ls command expects exactly one argument - a directory.");
    };

    let dir = Path::new(path);
    if !dir.is_dir() {
        env.writeln(&format!("{path} is not an existing directory."))?;
        return Ok(ShellStatus::Continue);
    }

    let entries = match local_readdir(dir) {
        Ok(entries) => entries,
        Err(e) => return io_failure(env, "ls", &e),
    };

    for entry in entries {
        let line = format!(
            "{} {:>10} {} {}",
            entry.permissions(),
            entry.size,
            format_timestamp(entry.created),
            entry.name
        );
        env.writeln(&line)?;
    }
    Ok(ShellStatus::Continue)
}

pub(crate) fn cmd_tree(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let Some(path) = path_arg(args) else {
        return usage_error(env, "tree", "The tree command expects exactly one argument - a directory.");
    };

    let root = Path::new(path);
    if !root.is_dir() {
        env.writeln(&format!("{path} is not an existing directory."))?;
        return Ok(ShellStatus::Continue);
    }

    let root_name = root
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
    env.writeln(&root_name)?;

    let walked = walk(root, 1, &mut |event| match event {
        WalkEvent::Directory { path, depth } => {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            env.writeln(&format!("{:indent$}{}", "", name, indent = depth * 2))
        }
        WalkEvent::File { .. } => Ok(()),
    })?;

    match walked {
        Ok(()) => Ok(ShellStatus::Continue),
        Err(e) => io_failure(env, "tree", &e),
    }
}

pub(crate) fn cmd_copy(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let parts = split_args(args);
    let [source, dest] = parts.as_slice() else {
        return usage_error(env, "copy", "The copy command expects exactly two arguments.");
    };

    let source = Path::new(source);
    if !source.is_file() {
        env.writeln(&format!("{} is not an existing file.", source.display()))?;
        return Ok(ShellStatus::Continue);
    }

    let dest = Path::new(dest);
    let target = if dest.is_dir() {
        match source.file_name() {
            Some(name) => dest.join(name),
            None => {
                env.writeln(&format!("Cannot determine the file name of {}.", source.display()))?;
                return Ok(ShellStatus::Continue);
            }
        }
    } else {
        dest.to_path_buf()
    };

    if target.is_dir() {
        env.writeln(&format!("{} is a directory.", target.display()))?;
        return Ok(ShellStatus::Continue);
    }

    if target.is_file() {
        if same_file(source, &target) {
            env.writeln("Source and destination are the same file.")?;
            return Ok(ShellStatus::Continue);
        }
        env.writeln(&format!("Overwrite {}? Input yes/no.", target.display()))?;
        let prompt = format!("{} ", env.prompt_symbol());
        env.write(&prompt)?;
        let answer = env.read_line()?;
        if answer.trim().eq_ignore_ascii_case("no") {
            env.writeln("No action was done.")?;
            return Ok(ShellStatus::Continue);
        }
    }

    match local_copy(source, &target) {
        Ok(bytes) => {
            tracing::debug!("copied {} bytes to {}", bytes, target.display());
            Ok(ShellStatus::Continue)
        }
        Err(e) => io_failure(env, "copy", &e),
    }
}

pub(crate) fn cmd_mkdir(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let Some(path) = path_arg(args) else {
        return usage_error(env, "mkdir", "The mkdir command expects exactly one argument - a directory.");
    };

    match local_mkdir(Path::new(path)) {
        Ok(()) => env.writeln(&format!("Directory {path} was created."))?,
        Err(e) => {
            tracing::debug!("mkdir {}: {}", path, e);
            env.writeln(&format!("There was an error in creating the directory: {path}"))?;
        }
    }
    Ok(ShellStatus::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::environment;
    use std::fs;

    #[test]
    fn ls_lists_single_level_with_four_columns() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("b.txt"), b"12345").unwrap();
        fs::create_dir_all(temp.path().join("a").join("deep")).unwrap();
        fs::write(temp.path().join("a").join("x"), b"123").unwrap();
        fs::write(temp.path().join("a").join("deep").join("y"), b"1234567").unwrap();

        let (mut env, output) = environment("");
        cmd_ls(&mut env, Some(temp.path().to_str().unwrap())).unwrap();

        let contents = output.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "not recursive: {contents}");

        let dir_cols: Vec<_> = lines[0].split_whitespace().collect();
        assert!(dir_cols[0].starts_with("dr"));
        assert_eq!(dir_cols[1], "10");
        assert_eq!(dir_cols[4], "a");

        let file_cols: Vec<_> = lines[1].split_whitespace().collect();
        assert!(file_cols[0].starts_with("-r"));
        assert_eq!(file_cols[1], "5");
        assert_eq!(file_cols[4], "b.txt");
        assert_eq!(&lines[1][4..15], "          5");
    }

    #[test]
    fn ls_rejects_file_path() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, b"x").unwrap();

        let (mut env, output) = environment("");
        let status = cmd_ls(&mut env, Some(file.to_str().unwrap())).unwrap();
        assert_eq!(status, ShellStatus::Continue);
        assert!(output.contents().ends_with("is not an existing directory.\n"));
    }

    #[test]
    fn ls_without_argument_points_to_help() {
        let (mut env, output) = environment("");
        cmd_ls(&mut env, None).unwrap();
        assert!(output.contents().ends_with("See help ls for more info.\n"));
    }

    #[test]
    fn tree_prints_directories_indented_by_depth() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("a").join("b")).unwrap();
        fs::create_dir_all(root.join("c")).unwrap();
        fs::write(root.join("a").join("file.txt"), b"ignored").unwrap();
        fs::write(root.join("top.txt"), b"ignored").unwrap();

        let (mut env, output) = environment("");
        cmd_tree(&mut env, Some(root.to_str().unwrap())).unwrap();
        assert_eq!(output.contents(), "root\n  a\n    b\n  c\n");
    }

    #[test]
    fn tree_rejects_missing_directory() {
        let (mut env, output) = environment("");
        cmd_tree(&mut env, Some("/no/such/dir/here")).unwrap();
        assert_eq!(output.contents(), "/no/such/dir/here is not an existing directory.\n");
    }

    #[test]
    fn copy_to_new_file_is_byte_identical() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("src.bin");
        let dest = temp.path().join("dst.bin");
        let content: Vec<u8> = (0..=255u8).cycle().take(9000).collect();
        fs::write(&source, &content).unwrap();

        let (mut env, output) = environment("");
        let args = format!("{} {}", source.display(), dest.display());
        cmd_copy(&mut env, Some(&args)).unwrap();
        assert_eq!(output.contents(), "");
        assert_eq!(fs::read(&dest).unwrap(), content);
    }

    #[test]
    fn copy_into_directory_keeps_basename() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("notes.txt");
        let dir = temp.path().join("backup");
        fs::write(&source, b"remember").unwrap();
        fs::create_dir(&dir).unwrap();

        let (mut env, _) = environment("");
        let args = format!("{} {}", source.display(), dir.display());
        cmd_copy(&mut env, Some(&args)).unwrap();
        assert_eq!(fs::read(dir.join("notes.txt")).unwrap(), b"remember");
    }

    #[test]
    fn copy_asks_before_overwriting_and_honours_no() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("new.txt");
        let dest = temp.path().join("old.txt");
        fs::write(&source, b"new").unwrap();
        fs::write(&dest, b"old").unwrap();

        let (mut env, output) = environment("NO\n");
        let args = format!("{} {}", source.display(), dest.display());
        cmd_copy(&mut env, Some(&args)).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"old");
        assert_eq!(
            output.contents(),
            format!("Overwrite {}? Input yes/no.\n> No action was done.\n", dest.display())
        );
    }

    #[test]
    fn copy_overwrites_on_any_other_answer() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("new.txt");
        let dest = temp.path().join("old.txt");
        fs::write(&source, b"new").unwrap();
        fs::write(&dest, b"old content").unwrap();

        let (mut env, _) = environment("sure\n");
        let args = format!("{} {}", source.display(), dest.display());
        cmd_copy(&mut env, Some(&args)).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn copy_refuses_same_file() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("same.txt");
        fs::write(&source, b"keep me").unwrap();

        let (mut env, output) = environment("");
        let args = format!("{} {}", source.display(), source.display());
        cmd_copy(&mut env, Some(&args)).unwrap();
        assert_eq!(output.contents(), "Source and destination are the same file.\n");
        assert_eq!(fs::read(&source).unwrap(), b"keep me");
    }

    #[test]
    fn copy_refuses_hard_link_to_source() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("a");
        let link = temp.path().join("b");
        fs::write(&source, b"precious data").unwrap();
        fs::hard_link(&source, &link).unwrap();

        let (mut env, output) = environment("yes\n");
        let args = format!("{} {}", source.display(), link.display());
        cmd_copy(&mut env, Some(&args)).unwrap();

        assert_eq!(output.contents(), "Source and destination are the same file.\n");
        assert_eq!(fs::read(&source).unwrap(), b"precious data");
        assert_eq!(fs::read(&link).unwrap(), b"precious data");
    }

    #[cfg(unix)]
    #[test]
    fn ls_lists_dangling_symlink() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("real"), b"x").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling")).unwrap();

        let (mut env, output) = environment("");
        cmd_ls(&mut env, Some(temp.path().to_str().unwrap())).unwrap();

        let contents = output.contents();
        let names: Vec<_> = contents
            .lines()
            .filter_map(|l| l.split_whitespace().last())
            .collect();
        assert_eq!(names, vec!["dangling", "real"]);
    }

    #[test]
    fn copy_needs_exactly_two_arguments() {
        let (mut env, output) = environment("");
        cmd_copy(&mut env, Some("only-one")).unwrap();
        assert_eq!(
            output.contents(),
            "The copy command expects exactly two arguments.\nSee help copy for more info.\n"
        );
    }

    #[test]
    fn copy_overwrite_prompt_propagates_end_of_input() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("a");
        let dest = temp.path().join("b");
        fs::write(&source, b"a").unwrap();
        fs::write(&dest, b"b").unwrap();

        let (mut env, _) = environment("");
        let args = format!("{} {}", source.display(), dest.display());
        let result = cmd_copy(&mut env, Some(&args));
        assert!(matches!(result, Err(crate::error::ShellError::EndOfInput)));
        assert_eq!(fs::read(&dest).unwrap(), b"b");
    }

    #[test]
    fn mkdir_creates_parents_and_reports() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("x").join("y").join("z");

        let (mut env, output) = environment("");
        cmd_mkdir(&mut env, Some(dir.to_str().unwrap())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(output.contents(), format!("Directory {} was created.\n", dir.display()));
    }

    #[test]
    fn mkdir_reports_generic_failure() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("blocker");
        fs::write(&file, b"x").unwrap();
        let under_file = file.join("child");

        let (mut env, output) = environment("");
        cmd_mkdir(&mut env, Some(under_file.to_str().unwrap())).unwrap();
        assert_eq!(
            output.contents(),
            format!("There was an error in creating the directory: {}\n", under_file.display())
        );
    }
}
