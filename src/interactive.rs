//! Terminal prompts used when mode or scheme are not given on the command
//! line. Prompts read from any `BufRead` and write to any `Write`, so the
//! binary wires them to stdin/stdout and tests to in-memory buffers.

use std::io::{self, BufRead, Write};

use dark_recolor::Scheme;

use crate::models::{AppConfig, ConversionMode};

/// Outcome of the scheme menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeChoice {
    Named(String),
    Custom,
    Invalid,
}

/// `1`/`raster` or `2`/`direct`.
pub fn parse_mode_choice(input: &str) -> Option<ConversionMode> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "raster" => Some(ConversionMode::Raster),
        "2" | "direct" => Some(ConversionMode::Direct),
        _ => None,
    }
}

/// A 1-based menu number, a listed name, or `c`/`custom`.
pub fn parse_scheme_choice(input: &str, names: &[&str]) -> SchemeChoice {
    let input = input.trim().to_ascii_lowercase();
    if input == "c" || input == "custom" {
        return SchemeChoice::Custom;
    }
    if let Ok(index) = input.parse::<usize>() {
        return match index.checked_sub(1).and_then(|i| names.get(i)) {
            Some(name) => SchemeChoice::Named(name.to_string()),
            None => SchemeChoice::Invalid,
        };
    }
    match names.iter().find(|name| name.eq_ignore_ascii_case(&input)) {
        Some(name) => SchemeChoice::Named(name.to_string()),
        None => SchemeChoice::Invalid,
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for the conversion mode; anything unrecognised means raster.
    pub fn select_mode(&mut self) -> io::Result<ConversionMode> {
        writeln!(self.output, "\nSelect conversion mode:")?;
        writeln!(self.output, "  [1] raster  - Converts pages to images, then recolors")?;
        writeln!(self.output, "                + Works with any PDF")?;
        writeln!(self.output, "                - Larger file size, no text selection")?;
        writeln!(self.output, "  [2] direct  - Modifies PDF color operators directly")?;
        writeln!(self.output, "                + Preserves vectors, text, small file size")?;
        writeln!(self.output, "                - May not work with complex PDFs")?;
        write!(self.output, "\nEnter choice (1 or 2): ")?;
        self.output.flush()?;

        let line = self.read_line()?;
        Ok(parse_mode_choice(&line).unwrap_or_else(|| {
            tracing::warn!(choice = %line, "Invalid mode choice, defaulting to raster");
            ConversionMode::Raster
        }))
    }

    /// Ask for a scheme from the config and presets, or custom colors.
    /// Invalid answers fall back to the default scheme.
    pub fn select_scheme(&mut self, config: &AppConfig) -> io::Result<Scheme> {
        let schemes = config.available_schemes();

        writeln!(self.output, "\nSelect color scheme:")?;
        for (i, scheme) in schemes.iter().enumerate() {
            writeln!(
                self.output,
                "  [{}] {:<10} (bg: {}, text: {})",
                i + 1,
                scheme.name(),
                scheme.background().hex(),
                scheme.text().hex()
            )?;
        }
        writeln!(self.output, "  [c] custom    - Enter your own hex colors")?;
        write!(self.output, "\nEnter choice: ")?;
        self.output.flush()?;

        let line = self.read_line()?;
        let names: Vec<&str> = schemes.iter().map(Scheme::name).collect();
        match parse_scheme_choice(&line, &names) {
            SchemeChoice::Custom => self.custom_scheme(),
            SchemeChoice::Named(name) => Ok(schemes
                .iter()
                .find(|s| s.name() == name)
                .cloned()
                .unwrap_or_default()),
            SchemeChoice::Invalid => {
                writeln!(self.output, "Invalid choice, using default 'dark' scheme")?;
                Ok(Scheme::default())
            }
        }
    }

    fn custom_scheme(&mut self) -> io::Result<Scheme> {
        write!(self.output, "Enter background color (hex, e.g., #1a1a1a): ")?;
        self.output.flush()?;
        let background = self.read_line()?;

        write!(self.output, "Enter text color (hex, e.g., #e0e0e0): ")?;
        self.output.flush()?;
        let text = self.read_line()?;

        match Scheme::custom(&background, &text) {
            Ok(scheme) => Ok(scheme),
            Err(e) => {
                writeln!(self.output, "Invalid colors: {e}\nUsing default 'dark' scheme")?;
                Ok(Scheme::default())
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
