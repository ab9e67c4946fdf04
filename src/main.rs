//! Hack Emulator - CLI Entry Point
//!
//! Commands:
//! - `hack-emu run <program>` - Run a machine-code or ASM file
//! - `hack-emu asm <source>` - Assemble to machine code
//! - `hack-emu disasm <image>` - Disassemble machine code

use clap::{Parser, Subcommand};
use serde::Serialize;

use hack::asm::disassemble_word;
use hack::{assemble, disassemble, load_image, save_image, Bit, Computer, Image, Word};

#[derive(Parser)]
#[command(name = "hack-emu")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A gate-level emulator of the Hack computer, a 16-bit von Neumann machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it walks off the end of ROM
    Run {
        /// Path to the machine-code or ASM file to execute
        program: String,
        /// Maximum number of cycles to run (default: 10000)
        #[arg(short, long, default_value = "10000")]
        max_cycles: u64,
        /// Seed a data-memory cell before the run (address=value, repeatable)
        #[arg(short, long, value_name = "ADDR=VALUE")]
        set: Vec<String>,
        /// Data-memory addresses to print after the run (repeatable)
        #[arg(short, long, value_name = "ADDR")]
        read: Vec<i16>,
        /// Show trace output
        #[arg(short, long)]
        trace: bool,
        /// Print the final machine state as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Assemble source to machine code
    Asm {
        /// Path to the source file
        source: String,
        /// Output image file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Disassemble machine code to readable text
    Disasm {
        /// Path to the image file
        image: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            program,
            max_cycles,
            set,
            read,
            trace,
            json,
        }) => {
            run_program(&program, max_cycles, &set, &read, trace, json);
        }
        Some(Commands::Asm { source, output }) => {
            assemble_file(&source, output);
        }
        Some(Commands::Disasm { image }) => {
            disassemble_file(&image);
        }
        None => {
            println!("Hack Emulator v0.1.0");
            println!("A gate-level 16-bit computer emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_logic_primitives();
        }
    }
}

/// Final machine state for the `--json` report.
#[derive(Serialize)]
struct RunReport {
    cycles: u64,
    halted: bool,
    a: i16,
    d: i16,
    pc: i16,
    ram: Vec<(i16, i16)>,
}

fn run_program(path: &str, max_cycles: u64, seeds: &[String], reads: &[i16], trace: bool, json: bool) {
    // Load program (either image or ASM)
    let instructions: Vec<Word> = if path.ends_with(".asm") {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to read file: {}", e);
                std::process::exit(1);
            }
        };

        match assemble(&source) {
            Ok(words) => {
                if !json {
                    println!("Assembled {} instructions", words.len());
                }
                words
            }
            Err(e) => {
                eprintln!("Assembly error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match load_image(path) {
            Ok(image) => {
                if !json {
                    println!("Loaded {} instructions", image.len());
                }
                image.instructions
            }
            Err(e) => {
                eprintln!("Failed to load image: {}", e);
                std::process::exit(1);
            }
        }
    };

    if instructions.is_empty() {
        eprintln!("No instructions to execute");
        std::process::exit(1);
    }

    let mut computer = Computer::new();
    computer.load_program(&instructions);

    // Apply data-memory stimulus
    for seed in seeds {
        let Some((addr, value)) = parse_seed(seed) else {
            eprintln!("Invalid --set '{}' (expected address=value)", seed);
            std::process::exit(1);
        };
        computer.seed_ram(Word::from_i16(addr), Word::from_i16(value));
    }

    if !json {
        println!();
        println!("--- Execution ---");
    }

    let mut cycles = 0u64;
    while !computer.is_halted() && cycles < max_cycles {
        let pc = computer.cpu.pc().to_i16();
        let fetched = computer.rom.fetch(computer.cpu.pc());

        match computer.step() {
            Some(_) => {
                if trace {
                    let listing = fetched.map(disassemble_word).unwrap_or_default();
                    println!(
                        "{:04}: {:<16}  A={} D={}",
                        pc,
                        listing,
                        computer.cpu.a().to_i16(),
                        computer.cpu.d().to_i16()
                    );
                }
                cycles += 1;
            }
            None => break,
        }
    }

    if json {
        let mut ram: Vec<(i16, i16)> = reads
            .iter()
            .map(|&addr| (addr, computer.ram.read(Word::from_i16(addr)).to_i16()))
            .collect();
        ram.sort_unstable();

        let report = RunReport {
            cycles: computer.cycles(),
            halted: computer.is_halted(),
            a: computer.cpu.a().to_i16(),
            d: computer.cpu.d().to_i16(),
            pc: computer.cpu.pc().to_i16(),
            ram,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!("--- Result ---");
    println!("Cycles: {}", computer.cycles());
    println!("State:  {:?}", computer.state());
    println!("A:  {}", computer.cpu.a().to_i16());
    println!("D:  {}", computer.cpu.d().to_i16());
    println!("PC: {}", computer.cpu.pc().to_i16());

    for &addr in reads {
        let value = computer.ram.read(Word::from_i16(addr));
        println!("RAM[{}] = {} ({})", addr, value.to_i16(), value);
    }

    if cycles >= max_cycles && !computer.is_halted() {
        println!();
        println!(
            "Reached max cycles limit ({}). Use --max-cycles to increase.",
            max_cycles
        );
    }
}

fn parse_seed(seed: &str) -> Option<(i16, i16)> {
    let (addr, value) = seed.split_once('=')?;
    Some((addr.trim().parse().ok()?, value.trim().parse().ok()?))
}

fn assemble_file(source_path: &str, output: Option<String>) {
    let out_path = output.unwrap_or_else(|| source_path.replace(".asm", ".hack"));

    println!("Assembling: {} -> {}", source_path, out_path);

    let source = match std::fs::read_to_string(source_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read file: {}", e);
            std::process::exit(1);
        }
    };

    let instructions = match assemble(&source) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Assembly error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Assembled {} instructions", instructions.len());

    if let Err(e) = save_image(&out_path, &Image::from(instructions)) {
        eprintln!("Failed to save image: {}", e);
        std::process::exit(1);
    }

    println!("Saved to {}", out_path);
}

fn disassemble_file(image_path: &str) {
    let image = match load_image(image_path) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Failed to load image: {}", e);
            std::process::exit(1);
        }
    };

    print!("{}", disassemble(&image.instructions));
}

fn demo_logic_primitives() {
    use hack::logic::{alu, gates, AluControl};

    println!("--- Gate-Level Demo ---");
    println!();

    println!("Words (16-bit, two's complement):");
    let a = Word::from_i16(42);
    let b = Word::from_i16(-17);
    println!("   42 = {}", a);
    println!("  -17 = {}", b);
    println!();

    println!("Ripple-carry addition:");
    let sum = gates::adder(&a, &b);
    println!("  {} + {} = {} ({})", a.to_i16(), b.to_i16(), sum.to_i16(), sum);
    println!();

    println!("ALU (x - y):");
    let control = AluControl {
        zx: Bit::O,
        nx: Bit::I,
        zy: Bit::O,
        ny: Bit::O,
        f: Bit::I,
        no: Bit::I,
    };
    let result = alu::alu(&a, &b, control);
    println!(
        "  {} - {} = {} (zr={} ng={})",
        a.to_i16(),
        b.to_i16(),
        result.out.to_i16(),
        result.zr,
        result.ng
    );
    println!();

    println!("Core logic primitives working.");
}
