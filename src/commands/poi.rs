//! Points of interest listing

use anyhow::Result;

use reelsync::cli::DisplayArgs;
use reelsync::player::collect_place_rows;
use reelsync::theme::current_theme;
use reelsync::timecode::format_seconds;
use reelsync::Config;

#[cfg(not(tarpaulin_include))]
pub fn handle(film: &str, display: &DisplayArgs, config: &Config) -> Result<()> {
    let film = super::load(film)?;
    let lang = super::language(display.lang.as_deref(), config);

    if display.json {
        let places: Vec<_> = film
            .places
            .iter()
            .map(|place| {
                let (lat, lng) = place.coordinates();
                let scenes: Vec<_> = place
                    .scenes()
                    .iter()
                    .map(|scene| {
                        serde_json::json!({
                            "time": scene.time.seconds(),
                            "timestamp": format_seconds(scene.time.seconds()),
                            "scene": scene.label_in(&lang),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "title": place.title_in(&lang),
                    "latitude": lat,
                    "longitude": lng,
                    "scenes": scenes,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    let theme = current_theme();
    println!("{}", theme.accent_text(&film.info.title));
    if film.places.is_empty() {
        println!("{}", theme.secondary_text("No points of interest."));
        return Ok(());
    }

    let rows = collect_place_rows(&film, &lang);
    let mut current = None;
    for row in &rows {
        if current != Some(row.place) {
            current = Some(row.place);
            let (lat, lng) = row.coordinates;
            println!(
                "{} {}",
                theme.primary_text(&row.place_title),
                theme.secondary_text(&format!("({:.5}, {:.5})", lat, lng))
            );
        }
        println!(
            "    {}  {}",
            format_seconds(row.time),
            theme.primary_text(&row.scene_label)
        );
    }
    Ok(())
}
