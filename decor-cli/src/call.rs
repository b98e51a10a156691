use crate::error::CliError;
use crate::input::{call_args, decorators};
use crate::{CallArgs, InspectArgs, report};
use decor_library::diag::SourceResult;
use decor_library::foundations::{Func, FuncKind, apply_values};
use decor_library::Library;

pub fn call(args: CallArgs, library: &Library) -> Result<(), CliError> {
    let func = decorated(library, &args.func, &args.with).or_else(report)?;
    let call_args = call_args(&args.args, &args.named)?;
    let value = func.call(call_args).or_else(report)?;
    println!("{value}");
    Ok(())
}

pub fn inspect(args: InspectArgs, library: &Library) -> Result<(), CliError> {
    let func = decorated(library, &args.func, &args.with).or_else(report)?;
    println!("name:   {}", func.name());
    println!("docs:   {}", func.docs().unwrap_or("-"));
    println!("arity:  {}", func.arity());
    println!("layers: {}", layers(&func).join(" > "));
    Ok(())
}

fn decorated(library: &Library, name: &str, with: &[String]) -> SourceResult<Func> {
    let base = library.func(name)?;
    apply_values(&decorators(library, with)?, base)
}

/// The layers of `func`, from the outermost wrapper to the innermost function.
fn layers(func: &Func) -> Vec<&str> {
    let mut layers = Vec::new();
    let mut current = func;
    loop {
        match current.kind() {
            FuncKind::Wrapper(wrapper) => {
                layers.push(wrapper.layer_name());
                current = wrapper.inner();
            }
            _ => {
                layers.push(current.name());
                return layers;
            }
        }
    }
}
