//! CLI command implementations.
//!
//! - [`query`] - One-shot place name resolution
//! - [`session`] - Interactive search session with a headless map

pub mod query;
pub mod session;

use gujin::place::PlaceResult;

/// Prints one resolved place in the standard block format.
pub fn print_result(result: &PlaceResult) {
    println!("{} → {}", result.ancient_name, result.modern_name);
    println!(
        "  {} · {:.4}°N, {:.4}°E",
        result.province, result.latitude, result.longitude
    );
    println!("  {}", result.description);
    println!("  朝代: {}", result.dynasty_info);
}
