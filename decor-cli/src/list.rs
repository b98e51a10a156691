use crate::error::CliError;
use decor_library::Library;
use tap::Tap;

pub fn list(library: &Library) -> Result<(), CliError> {
    let funcs = library
        .funcs()
        .collect::<Vec<_>>()
        .tap_mut(|funcs| funcs.sort_by_key(|(name, _)| *name));

    for (binding, func) in funcs {
        let summary = func
            .docs()
            .and_then(|docs| docs.lines().next())
            .unwrap_or("");
        if binding == func.name() {
            println!("{binding:<16} {:<4} {summary}", func.arity().to_string());
        } else {
            println!(
                "{binding:<16} {:<4} {summary} (reports as `{}`)",
                func.arity().to_string(),
                func.name()
            );
        }
    }

    Ok(())
}
