use super::{split_args, usage_error};
use crate::error::ShellResult;
use crate::shell::{Environment, ShellStatus, Symbol};

pub(crate) fn cmd_exit(_env: &mut Environment, _args: Option<&str>) -> ShellResult<ShellStatus> {
    Ok(ShellStatus::Terminate)
}

pub(crate) fn cmd_help(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let lines: Vec<String> = match args.map(str::trim).filter(|a| !a.is_empty()) {
        None => env
            .commands()
            .iter()
            .map(|cmd| format!("{:<10} {}", cmd.name, cmd.summary))
            .collect(),
        Some(name) => match env.commands().get(name) {
            Some(cmd) => cmd.description().map(str::to_string).collect(),
            None => vec![format!("Unknown command: {name}")],
        },
    };

    for line in &lines {
        env.writeln(line)?;
    }
    Ok(ShellStatus::Continue)
}

pub(crate) fn cmd_symbol(env: &mut Environment, args: Option<&str>) -> ShellResult<ShellStatus> {
    let parts = split_args(args);
    let (name, value) = match parts.as_slice() {
        [name] => (*name, None),
        [name, value] => (*name, Some(*value)),
        [] => return usage_error(env, "symbol", "The symbol command expects a symbol name."),
        _ => return usage_error(env, "symbol", "The symbol command expects one or two arguments."),
    };

    let symbol: Symbol = match name.parse() {
        Ok(symbol) => symbol,
        Err(bad) => {
            env.writeln(&format!("Invalid symbol name. Was: {bad}"))?;
            return Ok(ShellStatus::Continue);
        }
    };

    match value.and_then(|v| v.chars().next()) {
        Some(c) => env.set_symbol(symbol, c)?,
        None => {
            let current = env.symbol(symbol);
            env.writeln(&format!("Symbol for {symbol} is '{current}'."))?;
        }
    }
    Ok(ShellStatus::Continue)
}
