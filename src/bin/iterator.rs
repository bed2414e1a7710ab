use colored::Colorize;
use design_patterns::behavioral::iterator::DataStream;
use design_patterns::logging;

fn main() {
    logging::init();
    println!("{}", "=== Iterator: data stream processor ===".bold());

    let mut stream = DataStream::new();
    for chunk in ["chunk-1: sensor readings", "chunk-2: log lines", "chunk-3: metrics"] {
        stream.add_chunk(chunk.to_string());
    }

    println!("Stream holds {} chunks", stream.len());
    for (index, chunk) in stream.iter().enumerate() {
        println!("  [{}] {}", index.to_string().cyan(), chunk);
    }

    let lengths: Vec<usize> = stream.iter().map(String::len).collect();
    println!("Chunk lengths: {lengths:?}");

    println!("\nA second, independent pass:");
    for chunk in &stream {
        println!("  {}", chunk.to_uppercase());
    }

    let numbers: DataStream<i32> = (1..=5).collect();
    println!("\nSum of numeric stream: {}", numbers.iter().sum::<i32>());
}
