use std::process;

use zeroc::cli::{help_text, parse_args, version_text, ParseArgsResult};
use zeroc::diagnostics::render_error;
use zeroc::interp::{Interpreter, RuntimeValue};
use zeroc::ir::printer::print_module;
use zeroc::source::SourceManager;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match parse_args(&args) {
        Ok(ParseArgsResult::Help) => {
            print!("{}", help_text());
        }
        Ok(ParseArgsResult::Version) => {
            print!("{}", version_text());
        }
        Ok(ParseArgsResult::Args(cli)) => {
            let code = compile_and_run(&cli);
            process::exit(code);
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprint!("{}", help_text());
            process::exit(1);
        }
    }
}

fn compile_and_run(cli: &zeroc::cli::CliArgs) -> i32 {
    let path = cli.path.to_string_lossy().to_string();

    let mut sm = SourceManager::new();
    let id = sm.load(&path);
    if !id.is_valid() {
        eprintln!("error: Failed to load file: {}", path);
        return 1;
    }

    if cli.dump_ast {
        println!("AST dump not yet implemented");
        return 0;
    }

    let module = match zeroc::compile(&sm, id) {
        Ok(module) => module,
        Err(errors) => {
            for err in &errors {
                eprint!("{}", render_error(&sm, err));
            }
            return 1;
        }
    };

    if cli.dump_ir {
        print!("{}", print_module(&module));
        return 0;
    }

    let mut interp = Interpreter::new();
    interp.register_external("print", |args| {
        let mut line = String::new();
        for arg in args {
            match arg {
                RuntimeValue::Int(n) => line.push_str(&n.to_string()),
                RuntimeValue::Float(x) => line.push_str(&x.to_string()),
                _ => {}
            }
        }
        println!("{}", line);
        RuntimeValue::Void
    });

    match interp.execute(&module, "main") {
        Ok(_) => interp.exit_code(),
        Err(err) => {
            eprint!("{}", render_error(&sm, &err.into()));
            1
        }
    }
}
