use std::process::ExitCode;

use mango_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    mango_driver::run(argument)
}
