use crate::configuration::Settings;
use crate::fonts::FontSet;
use crate::models::{Strip, StripIndex};
use crate::render;
use anyhow::Context;
use image::DynamicImage;
use log::{debug, info, warn};
use resolve_path::PathResolveExt;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(settings: Settings) -> anyhow::Result<()> {
    info!("Public Directory: {}", settings.public_dir);
    let public_dir = settings.public_dir.resolve().into_owned();

    let index = StripIndex::load(&public_dir.join(&settings.strips_file));
    debug!("Strips {:?}", index.strips);

    let fonts = FontSet::load()?;

    let canvas = match index.latest() {
        Some(strip) => match open_strip_image(strip, &public_dir, &settings.url_prefix) {
            Ok(strip_img) => {
                info!("✓ Open Graph image generated with strip: {}", strip.title);
                render::strip_canvas(strip, &strip_img, &fonts)
            }
            Err(e) => {
                warn!("⚠ Could not load strip image: {}", e);
                info!("  Generating default image...");
                render::default_canvas(&fonts)
            }
        },
        None => {
            info!("✓ Default Open Graph image generated");
            render::default_canvas(&fonts)
        }
    };

    let output_path = public_dir.join(&settings.output_file);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    canvas
        .save(&output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;
    info!("✓ Saved to: {}", output_path.display());

    Ok(())
}

/// Maps the strip's site URL to a local file under `public_dir` and opens
/// it. Any failure here sends the caller down the default path.
fn open_strip_image(
    strip: &Strip,
    public_dir: &Path,
    url_prefix: &str,
) -> anyhow::Result<DynamicImage> {
    anyhow::ensure!(!strip.image_url.is_empty(), "strip has no image url");
    let local_path = local_image_path(&strip.image_url, public_dir, url_prefix);
    debug!("Opening strip image {}", local_path.display());
    image::open(&local_path).with_context(|| format!("opening {}", local_path.display()))
}

fn local_image_path(image_url: &str, public_dir: &Path, url_prefix: &str) -> PathBuf {
    let relative = image_url.strip_prefix(url_prefix).unwrap_or(image_url);
    public_dir.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn fonts_available() -> bool {
        if FontSet::load().is_ok() {
            true
        } else {
            eprintln!("skipping run test: no system fonts available");
            false
        }
    }

    fn test_site(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("paperboy-og-run-tests").join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("data")).unwrap();
        dir
    }

    fn settings_for(dir: &Path) -> Settings {
        Settings {
            public_dir: dir.to_string_lossy().into_owned(),
            strips_file: "data/strips.json".into(),
            output_file: "og-image.png".into(),
            url_prefix: "/Porterias/".into(),
        }
    }

    #[test]
    fn url_prefix_is_stripped() {
        let path = local_image_path("/Porterias/strips/001.png", Path::new("/site"), "/Porterias/");
        assert_eq!(PathBuf::from("/site/strips/001.png"), path);
    }

    #[test]
    fn unprefixed_url_is_joined_as_is() {
        let path = local_image_path("strips/001.png", Path::new("/site"), "/Porterias/");
        assert_eq!(PathBuf::from("/site/strips/001.png"), path);
    }

    #[test]
    fn empty_image_url_is_an_error() {
        let strip = Strip {
            title: "x".into(),
            publish_date: "2025-01-01".into(),
            image_url: String::new(),
        };
        assert!(open_strip_image(&strip, Path::new("/site"), "/Porterias/").is_err());
    }

    #[test]
    fn missing_index_still_produces_valid_png() {
        if !fonts_available() {
            return;
        }
        let dir = test_site("missing-index");

        run(settings_for(&dir)).unwrap();

        let out = image::open(dir.join("og-image.png")).unwrap();
        assert_eq!((render::WIDTH, render::HEIGHT), (out.width(), out.height()));
    }

    #[test]
    fn broken_image_reference_falls_back_to_default() {
        if !fonts_available() {
            return;
        }
        let dir = test_site("broken-image");
        fs::write(
            dir.join("data/strips.json"),
            r#"{ "strips": [ { "title": "Derbi", "publish_date": "2025-03-15", "image_url": "/Porterias/strips/missing.png" } ] }"#,
        )
        .unwrap();

        run(settings_for(&dir)).unwrap();

        let out = image::open(dir.join("og-image.png")).unwrap().to_rgb8();
        assert_eq!((render::WIDTH, render::HEIGHT), out.dimensions());
        // Default path draws the thicker 8 px accent bar.
        assert_eq!(&render::ACCENT, out.get_pixel(600, 7));
    }

    #[test]
    fn latest_strip_is_composited_onto_the_canvas() {
        if !fonts_available() {
            return;
        }
        let dir = test_site("with-strip");
        fs::create_dir_all(dir.join("strips")).unwrap();
        RgbImage::from_pixel(400, 200, Rgb([255, 255, 255]))
            .save(dir.join("strips/derbi.png"))
            .unwrap();
        fs::write(
            dir.join("data/strips.json"),
            r#"{ "strips": [
                { "title": "Entrenamiento", "publish_date": "2025-03-01", "image_url": "/Porterias/strips/missing.png" },
                { "title": "Derbi", "publish_date": "2025-03-15", "image_url": "/Porterias/strips/derbi.png" }
            ] }"#,
        )
        .unwrap();

        run(settings_for(&dir)).unwrap();

        let out = image::open(dir.join("og-image.png")).unwrap().to_rgb8();
        assert_eq!((render::WIDTH, render::HEIGHT), out.dimensions());
        // The white strip image shows in the content region.
        assert!(out.get_pixel(600, 335).0.iter().all(|&c| c >= 250));
        // Strip path draws the 6 px accent bar, not the 8 px one.
        assert_eq!(&render::ACCENT, out.get_pixel(600, 5));
        assert_ne!(&render::ACCENT, out.get_pixel(600, 7));
    }
}
