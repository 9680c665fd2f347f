use clap::Parser;
use pnbert_rs::bits::bits_to_bytes;
use pnbert_rs::pn::{PnEngine, PnPattern, Polynomial};

/// Print the start of a PN sequence
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = PnPattern::Pn15)]
    pattern: PnPattern,
    /// Register order, overrides --pattern
    #[arg(long)]
    order: Option<u32>,
    /// Number of bits to print
    #[arg(short, long, default_value_t = 64)]
    bits: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let poly = match args.order {
        Some(order) => Polynomial::for_order(order)?,
        None => args.pattern.polynomial(),
    };
    let engine = PnEngine::new(poly);

    println!(
        "PN{} taps {:?}, period {} bits, first {} bits:",
        poly.order(),
        poly.taps(),
        poly.period(),
        args.bits
    );

    let bits: Vec<u8> = engine.take(args.bits).collect();
    for (i, chunk) in bits.chunks(32).enumerate() {
        let line: String = chunk
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect();
        println!("  {:5}: {}", i * 32, line);
    }

    let bytes: Vec<String> = bits_to_bytes(&bits)
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect();
    println!("bytes (MSB first): {}", bytes.join(" "));
    Ok(())
}
