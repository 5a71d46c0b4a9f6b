// src/bin/seed.rs
// DOCUMENTATION: Development data seeder
// PURPOSE: Wipe campgrounds/reviews and insert a fresh batch of sample listings

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;
use yelpcamp::config::{init_db_pool, Config};
use yelpcamp::db::{CampgroundRepository, PgCampgroundRepository};
use yelpcamp::models::NewCampground;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const CAMPGROUND_COUNT: usize = 50;

const CITIES: &[(&str, &str)] = &[
    ("Anchorage", "Alaska"),
    ("Asheville", "North Carolina"),
    ("Bend", "Oregon"),
    ("Boise", "Idaho"),
    ("Bozeman", "Montana"),
    ("Burlington", "Vermont"),
    ("Duluth", "Minnesota"),
    ("Durango", "Colorado"),
    ("Flagstaff", "Arizona"),
    ("Jackson", "Wyoming"),
    ("Ketchum", "Idaho"),
    ("Lake Placid", "New York"),
    ("Marquette", "Michigan"),
    ("Moab", "Utah"),
    ("Missoula", "Montana"),
    ("Santa Fe", "New Mexico"),
    ("South Lake Tahoe", "California"),
    ("Taos", "New Mexico"),
    ("Traverse City", "Michigan"),
    ("Whitefish", "Montana"),
];

const DESCRIPTORS: &[&str] = &[
    "Forest", "Ancient", "Petrified", "Roaring", "Cascade", "Tumbling", "Silent",
    "Redwood", "Bullfrog", "Maple", "Misty", "Elk", "Grizzly", "Ocean", "Sea", "Sky",
    "Dusty", "Diamond",
];

const PLACES: &[&str] = &[
    "Flats", "Village", "Canyon", "Pond", "Group Camp", "Horse Camp", "Ghost Town",
    "Camp", "Dispersed Camp", "Backcountry", "River", "Creek", "Creekside", "Bay",
    "Spring", "Bayshore", "Sands", "Mule Camp", "Hunting Camp", "Cliffs", "Hollow",
];

const DESCRIPTION: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit. \
    Quibusdam dolores vero perferendis laudantium, consequuntur voluptatibus nulla \
    architecto, sit soluta esse iure sed labore ipsam a cum nihil atque molestiae deserunt!";

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// One random sample listing
fn sample_campground<R: Rng>(rng: &mut R) -> NewCampground {
    let (city, state) = CITIES.choose(rng).copied().unwrap_or(("Moab", "Utah"));
    let price = rng.gen_range(10..30_u32);

    NewCampground {
        title: format!("{} {}", pick(rng, DESCRIPTORS), pick(rng, PLACES)),
        location: format!("{}, {}", city, state),
        price: f64::from(price),
        description: DESCRIPTION.to_string(),
        image: format!(
            "https://picsum.photos/seed/{}/800/600",
            rng.gen_range(1..10_000_u32)
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    println!("{}╔══════════════════════════════════════════════╗{}", CYAN, RESET);
    println!("{}║   🏕️  YelpCamp Seeder                         ║{}", CYAN, RESET);
    println!("{}╚══════════════════════════════════════════════╝{}", CYAN, RESET);

    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    let started = Instant::now();

    let wiped_reviews = sqlx::query("DELETE FROM reviews")
        .execute(&pool)
        .await
        .context("Failed to clear reviews")?
        .rows_affected();
    let wiped_campgrounds = sqlx::query("DELETE FROM campgrounds")
        .execute(&pool)
        .await
        .context("Failed to clear campgrounds")?
        .rows_affected();

    println!(
        "\n{}🧹 Removed {} campgrounds and {} reviews{}",
        YELLOW, wiped_campgrounds, wiped_reviews, RESET
    );

    let repository = PgCampgroundRepository::new(pool);
    let mut rng = rand::thread_rng();

    println!("\n{}🚀 Inserting {} campgrounds...{}\n", BOLD, CAMPGROUND_COUNT, RESET);
    for i in 0..CAMPGROUND_COUNT {
        let input = sample_campground(&mut rng);
        let campground = repository
            .create(&input, None)
            .await
            .with_context(|| format!("Failed to insert campground {}", i + 1))?;

        println!(
            "{}[{}/{}]{} {} ({}, ${}/night)",
            CYAN,
            i + 1,
            CAMPGROUND_COUNT,
            RESET,
            campground.title,
            campground.location,
            campground.price
        );
    }

    println!(
        "\n{}✨ Seeded {} campgrounds in {:.1}s{}",
        GREEN,
        CAMPGROUND_COUNT,
        started.elapsed().as_secs_f64(),
        RESET
    );
    Ok(())
}
