//! protor's main entry point: argument parsing, logger setup, and
//! dispatch to the render engine.

use protor::{
    args::ArgumentBag,
    cli::{get_args, Args, Command},
    doc::DEFAULT_COMMAND_PREFIX,
    engine::{script_path_for_doc, Engine},
    error::{default_error_handler, Result},
    loader::load_template,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    starter,
};

fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let renderer = MiniJinjaRenderer::new();
    let prompter = DialoguerPrompter::new();
    let engine = Engine::new(&renderer, &prompter);

    match args.command {
        Command::Generate { template, output_dir, overwrite, template_args } => {
            let template_root = load_template(&prompter, template.as_str())?;
            let bag = ArgumentBag::from_raw_args(&template_args);
            let extra_context = serde_json::Map::new();

            engine.render(&template_root, &output_dir, &bag, &extra_context, overwrite)?;

            println!(
                "Template generation completed successfully in {}.",
                output_dir.display()
            );
        }
        Command::Man { template } => {
            let template_root = load_template(&prompter, template.as_str())?;
            let script_path = script_path_for_doc(&template_root)?;
            let manual =
                engine.render_doc(&script_path, Some(&template), DEFAULT_COMMAND_PREFIX)?;
            println!("{manual}");
        }
        Command::New { out_dir } => {
            let out_dir = match out_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            starter::create_template(&out_dir)?;
            println!("Starter template created in {}.", out_dir.display());
        }
    }

    Ok(())
}
