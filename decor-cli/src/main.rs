/*!
# The decor command line

Look up functions from the built-in library, decorate them at runtime and
call or inspect them.

```text
decor call greet --with strong --with emphasis
decor call apply_discount --with recover=0 --trace
decor inspect yell --with renamed=shout
```
*/
use crate::error::CliError;
use clap::Parser;
use decor_library::diag::{Diagnostic, write_diagnostics};
use decor_utils::ENABLE_TRACE;
use ecow::EcoVec;

mod call;
mod error;
mod input;
mod list;

#[derive(Debug, clap::Parser)]
#[clap(name = "decor", version)]
struct Args {
    #[clap(subcommand)]
    pub command: Command,

    #[clap(long, global = true)]
    /// Print the enter and exit of every call to stderr
    pub trace: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// List the functions and decorators of the library
    List,
    /// Call a function, optionally decorated
    Call(CallArgs),
    /// Show what a function reports about itself once decorated
    Inspect(InspectArgs),
}

#[derive(Debug, clap::Parser)]
pub struct CallArgs {
    /// The name the function is bound to
    pub func: String,

    #[clap(allow_negative_numbers = true)]
    /// Positional arguments. Integers, floats and booleans are parsed as such,
    /// anything else is passed as a string
    pub args: Vec<String>,

    #[clap(long = "named", value_name = "KEY=VALUE")]
    /// A named argument
    pub named: Vec<String>,

    #[clap(long = "with", value_name = "DECORATOR")]
    /// A decorator to apply, the first one ending up outermost. Use
    /// `factory=value` to build the decorator from a factory first
    pub with: Vec<String>,
}

#[derive(Debug, clap::Parser)]
pub struct InspectArgs {
    /// The name the function is bound to
    pub func: String,

    #[clap(long = "with", value_name = "DECORATOR")]
    /// A decorator to apply, as for `call`
    pub with: Vec<String>,
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();

    ENABLE_TRACE.store(args.trace, std::sync::atomic::Ordering::Relaxed);

    let library = decor_library::library();
    match args.command {
        Command::List => list::list(&library)?,
        Command::Call(args) => call::call(args, &library)?,
        Command::Inspect(args) => call::inspect(args, &library)?,
    }

    Ok(())
}

/// Print `errors` to stderr and turn them into an execution failure.
pub fn report<T>(errors: EcoVec<Diagnostic>) -> Result<T, CliError> {
    write_diagnostics(&errors, &mut std::io::stderr().lock())?;
    Err(CliError::Execution)
}
