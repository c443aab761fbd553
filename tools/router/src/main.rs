//! End-to-end routing run: terrain image + elevation file + waypoint list
//! + season in, annotated image (and optionally route JSON) out.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use trek_core::{parse_waypoints, ElevationGrid, Router, Season, TerrainClass, TerrainGrid};

#[derive(Parser, Debug)]
#[command(name = "router", about = "Seasonal terrain routing through an ordered waypoint list")]
struct Args {
    /// Terrain map image with one class color per pixel.
    terrain_image: PathBuf,

    /// Elevation file: one row of whitespace-separated values per pixel row.
    elevation_file: PathBuf,

    /// Waypoint file: one "x y" pair per line, visited in order.
    waypoint_file: PathBuf,

    /// One of summer, fall, winter, spring.
    season: String,

    /// Where to write the image with the route drawn in.
    output_image: PathBuf,

    /// Also dump the route (cells, cost, distance) as JSON.
    #[arg(long)]
    route_json: Option<PathBuf>,
}

fn rgb24(pixel: &image::Rgb<u8>) -> u32 {
    ((pixel[0] as u32) << 16) | ((pixel[1] as u32) << 8) | pixel[2] as u32
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Plotting the terrain image…");
    let img = image::open(&args.terrain_image)
        .with_context(|| format!("cannot open {}", args.terrain_image.display()))?
        .to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let pixels: Vec<u32> = img.pixels().map(rgb24).collect();

    println!("Reading the elevation file…");
    let elevation_reader = BufReader::new(
        File::open(&args.elevation_file)
            .with_context(|| format!("cannot open {}", args.elevation_file.display()))?,
    );
    let elevation = ElevationGrid::from_reader(elevation_reader, width, height)?;

    let mut terrain = TerrainGrid::classify(width, height, &pixels, elevation)?;

    println!("Building the waypoint list…");
    let waypoint_reader = BufReader::new(
        File::open(&args.waypoint_file)
            .with_context(|| format!("cannot open {}", args.waypoint_file.display()))?,
    );
    let waypoints = parse_waypoints(waypoint_reader)?;

    let season: Season = args.season.parse()?;
    println!("Tis the season of {season}.");
    terrain.apply_season(season);

    println!("Running the terrain…");
    let router = Router::new(&terrain);
    let route = router.route(&waypoints)?;

    println!("Printing the image…");
    let marker = TerrainClass::RouteMarker.color();
    let marker_rgb = image::Rgb([(marker >> 16) as u8, (marker >> 8) as u8, marker as u8]);
    let mut out = img;
    for cell in &route.cells {
        out.put_pixel(cell.x as u32, cell.y as u32, marker_rgb);
    }
    out.save(&args.output_image)
        .with_context(|| format!("cannot write {}", args.output_image.display()))?;

    if let Some(path) = &args.route_json {
        let file =
            File::create(path).with_context(|| format!("cannot write {}", path.display()))?;
        serde_json::to_writer_pretty(file, &route)?;
    }

    println!("Total travel time… {:.3}", route.cost);
    println!("Minimum distance… {:.3}", route.distance);

    Ok(())
}
