// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use config::Config;
use tourism::TourismController;

fn main() -> Result<(), Error> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "tourism.toml".into());
    let config = Config::load(&path)?;

    println!("Loading artifacts from {}", config.artifacts.dir.display());
    let controller = TourismController::load(&config.artifacts)?;

    println!("Users with predicted ratings: {}", controller.users_count());
    println!("Attractions: {}", controller.attractions_count());

    let violations = controller.diagonal_violations();
    if violations.is_empty() {
        println!("Every similarity row ranks its own attraction first");
    } else {
        println!(
            "{} similarity rows rank another attraction above themselves: {:?}",
            violations.len(),
            violations
        );
    }

    Ok(())
}
