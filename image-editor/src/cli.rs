use crate::{
    Editor, Operation,
    config::Config,
    viewer::{self, Viewer},
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

pub const INPUT_PROMPT: &str = "Enter the path to the image file: ";
pub const SAVE_PROMPT: &str = "Enter the path to save the processed image: ";
pub const DONE_MESSAGE: &str = "Image processing complete. Processed image saved.";

pub fn operation_prompt() -> String {
    format!("Enter the operation ({}): ", Operation::names())
}

#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Image to load
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Operation to apply: blur, sharpen or edge_detection
    #[arg(short, long, value_name = "NAME")]
    pub operation: Option<String>,

    /// Where to save the processed image
    #[arg(short, long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log images instead of opening a window
    #[arg(long)]
    pub no_display: bool,
}

/// Line based question and answer over any reader and writer.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes `prompt` and returns the next line without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("unexpected end of input");
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn answer_or_ask(&mut self, answer: Option<String>, prompt: &str) -> Result<String> {
        match answer {
            Some(answer) => Ok(answer),
            None => self.ask(prompt),
        }
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// Load, apply and save, prompting for whatever `args` leaves out.
pub fn run_with<R: BufRead, W: Write>(
    args: Args,
    config: &Config,
    viewer: Box<dyn Viewer>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let mut editor = Editor::new(config, viewer)?;

    let input = prompter.answer_or_ask(
        args.input.map(|p| p.to_string_lossy().into_owned()),
        INPUT_PROMPT,
    )?;
    editor.load(&input)?;

    let operation = prompter.answer_or_ask(args.operation, &operation_prompt())?;
    editor.apply_named(&operation)?;

    let save = prompter.answer_or_ask(
        args.save.map(|p| p.to_string_lossy().into_owned()),
        SAVE_PROMPT,
    )?;
    editor.save(&save)?;

    prompter.say(DONE_MESSAGE)
}

pub fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).with_context(|| {
        format!(
            "load config {} failed",
            args.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<default>".to_string())
        )
    })?;

    let viewer = viewer::create(!args.no_display && config.display.enabled);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_with(args, &config, viewer, &mut prompter)
}
