//! Demo: URL validation and plan checks
//!
//! Run with: cargo run -p ytr-models --example youtube_url_demo

use ytr_models::{check_duration_limit, format_duration, safe_filename, validate_youtube_url};

fn main() {
    let test_urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ?t=30",
        "https://www.youtube.com/shorts/abc123def45",
        "youtube.com/embed/dQw4w9WgXcQ",
        "dQw4w9WgXcQ",
        "https://vimeo.com/123456789",
        "   ",
    ];

    for url in test_urls {
        println!("\n{}", "=".repeat(60));
        println!("INPUT: {:?}", url);

        match validate_youtube_url(url) {
            Ok(video) => {
                println!("VIDEO ID:  {}", video);
                println!("WATCH URL: {}", video.watch_url());
                println!("FILENAME:  {}", safe_filename("Never Gonna Give You Up!", video.as_str()));
            }
            Err(e) => println!("ERROR:     {}", e),
        }
    }

    println!("\n{}", "=".repeat(60));
    for (tier, seconds) in [("free_trial", 1801), ("pro", 5400), ("ultra", 86_400), ("gold", 60)] {
        let check = check_duration_limit(seconds, tier);
        println!(
            "{:<10} {:>8} allowed={} {}",
            tier,
            format_duration(seconds),
            check.allowed,
            check.message.unwrap_or_default()
        );
    }
}
