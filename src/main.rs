//! rv32i_disasm CLI 入口
//!
//! 用法：
//!   rv32i_disasm_cli                交互模式，逐行输入指令字
//!   rv32i_disasm_cli <FILE>         每行一个字面量的批处理文件
//!   rv32i_disasm_cli --elf <FILE>   反汇编 RV32 ELF 的可执行段

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rv32i_disasm::image::ElfImage;
use rv32i_disasm::listing::{Listing, ListingConfig};
use rv32i_disasm::literal::parse_word;

const BANNER: &str = "Enter an instruction (e.g. 0x80000537). Exit with \"exit\".";
const PROMPT: &str = ">> ";
const EXIT_COMMAND: &str = "exit";

#[derive(Parser)]
#[command(name = "rv32i_disasm_cli")]
#[command(about = "Decode RV32I machine words into assembly", long_about = None)]
struct Cli {
    /// Literal file (one word per line) or, with --elf, an RV32 ELF image
    input: Option<PathBuf>,

    /// Treat INPUT as an ELF image and disassemble its executable segments
    #[arg(short, long, requires = "input")]
    elf: bool,

    /// Prefix each line with the raw instruction word
    #[arg(short, long)]
    raw: bool,

    /// Prefix each line with its address (word index * 4 outside --elf; always on for --elf)
    #[arg(short, long)]
    address: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = ListingConfig::default()
        .with_raw(cli.raw)
        .with_address(cli.address || cli.elf);
    let listing = Listing::new(config);

    match cli.input {
        None => run_repl(&listing),
        Some(path) if cli.elf => run_elf(&path, &listing),
        Some(path) => run_file(&path, &listing),
    }
}

fn run_repl(listing: &Listing) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
    println!("{BANNER}");

    let mut index = 0u32;
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == EXIT_COMMAND {
                    return Ok(());
                }
                if let Err(e) = editor.add_history_entry(line) {
                    log::debug!("history entry dropped: {e}");
                }
                match parse_word(line) {
                    Ok(word) => {
                        println!("{}", listing.indexed_line(index, word));
                        index = index.wrapping_add(1);
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }
}

fn run_file(path: &Path, listing: &Listing) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Could not read file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut index = 0u32;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let word = parse_word(line)
            .with_context(|| format!("{}:{}: malformed instruction word", path.display(), lineno + 1))?;
        println!("{}", listing.indexed_line(index, word));
        index = index.wrapping_add(1);
    }
    log::debug!("decoded {} words from {}", index, path.display());
    Ok(())
}

fn run_elf(path: &Path, listing: &Listing) -> Result<()> {
    let image = ElfImage::parse(path).with_context(|| format!("Failed to load ELF: {}", path.display()))?;
    log::info!(
        "entry 0x{:08x}, {} executable segment(s)",
        image.entry,
        image.segments.len()
    );

    for segment in &image.segments {
        println!();
        println!("segment @ 0x{:08x} ({} bytes):", segment.vaddr, segment.data.len());
        for (addr, word) in segment.words() {
            println!("{}", listing.line(addr, word));
        }
    }
    Ok(())
}
