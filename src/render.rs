use crate::fonts::FontSet;
use crate::models::Strip;
use ab_glyph::{FontVec, PxScale};
use chrono::{Datelike, NaiveDate};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Open Graph recommended size.
pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const HEADER_HEIGHT: u32 = 120;
const FOOTER_HEIGHT: u32 = 80;
const SIDE_PADDING: u32 = 40;
const OVERLAY_ALPHA: u8 = 230;

// Site palette.
pub const BACKGROUND: Rgb<u8> = Rgb([15, 23, 42]); // #0f172a
pub const ACCENT: Rgb<u8> = Rgb([245, 158, 11]); // #f59e0b
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const SLATE_400: Rgb<u8> = Rgb([148, 163, 184]);
const SLATE_300: Rgb<u8> = Rgb([203, 213, 225]);
const SLATE_500: Rgb<u8> = Rgb([100, 116, 139]);

const SITE_TITLE: &str = "PAPERBOY - LA PORTERÍA";
const SITE_URL: &str = "albertomaydayjhondoe.github.io/Porterias";

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Composites the latest strip onto the canvas: resized and centered in the
/// content region, shaded header/footer bands for legibility, site title on
/// top, strip title and date below.
pub fn strip_canvas(strip: &Strip, strip_img: &DynamicImage, fonts: &FontSet) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let region_w = WIDTH - 2 * SIDE_PADDING;
    let region_h = HEIGHT - HEADER_HEIGHT - FOOTER_HEIGHT;
    let (new_w, new_h) = fit_within(strip_img.width(), strip_img.height(), region_w, region_h);
    let resized = strip_img
        .resize_exact(new_w, new_h, FilterType::Lanczos3)
        .to_rgb8();

    let x_offset = (WIDTH - new_w) / 2;
    let y_offset = HEADER_HEIGHT + (region_h - new_h) / 2;
    imageops::overlay(&mut canvas, &resized, x_offset as i64, y_offset as i64);

    shade_band(&mut canvas, 0, HEADER_HEIGHT, BACKGROUND, OVERLAY_ALPHA);
    shade_band(
        &mut canvas,
        HEIGHT - FOOTER_HEIGHT,
        HEIGHT,
        BACKGROUND,
        OVERLAY_ALPHA,
    );

    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(WIDTH, 6), ACCENT);

    draw_centered(&mut canvas, SITE_TITLE, 35, 48.0, &fonts.bold, WHITE);

    let footer_top = (HEIGHT - FOOTER_HEIGHT) as i32;
    draw_centered(
        &mut canvas,
        &strip.title,
        footer_top + 15,
        22.0,
        &fonts.regular,
        WHITE,
    );
    draw_centered(
        &mut canvas,
        &spanish_date(&strip.publish_date),
        footer_top + 50,
        18.0,
        &fonts.regular,
        SLATE_400,
    );

    canvas
}

/// The textless-strip fallback: brand name, subtitle, two description lines,
/// a decorative rule and the site URL on the plain dark canvas.
pub fn default_canvas(fonts: &FontSet) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(WIDTH, 8), ACCENT);

    draw_centered(&mut canvas, "PAPERBOY", 150, 100.0, &fonts.bold, WHITE);
    draw_centered(&mut canvas, "LA PORTERÍA", 280, 28.0, &fonts.regular, SLATE_400);
    draw_centered(
        &mut canvas,
        "Tiras cómicas diarias",
        360,
        24.0,
        &fonts.regular,
        SLATE_300,
    );
    draw_centered(
        &mut canvas,
        "con estilo minimalista tipo periódico",
        400,
        24.0,
        &fonts.regular,
        SLATE_300,
    );

    let rule = Rect::at((WIDTH / 2 - 200) as i32, 459).of_size(400, 3);
    draw_filled_rect_mut(&mut canvas, rule, ACCENT);

    draw_centered(&mut canvas, SITE_URL, 530, 20.0, &fonts.mono, SLATE_500);

    canvas
}

/// Largest size with the source's aspect ratio that fits the region:
/// width-bound when the source is proportionally wider than the region,
/// height-bound otherwise.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let src_ratio = src_w as f32 / src_h as f32;
    let region_ratio = max_w as f32 / max_h as f32;
    if src_ratio > region_ratio {
        (max_w, ((max_w as f32 / src_ratio).round() as u32).max(1))
    } else {
        (((max_h as f32 * src_ratio).round() as u32).max(1), max_h)
    }
}

/// `"2025-03-15"` becomes `"15 de marzo, 2025"`. Anything that does not
/// parse as an ISO date is passed through untouched.
pub fn spanish_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => format!(
            "{:02} de {}, {}",
            date.day(),
            SPANISH_MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => raw.to_string(),
    }
}

fn draw_centered(canvas: &mut RgbImage, text: &str, y: i32, size: f32, font: &FontVec, color: Rgb<u8>) {
    let scale = PxScale::from(size);
    let (text_w, _) = text_size(scale, font, text);
    let x = (WIDTH.saturating_sub(text_w) / 2) as i32;
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

/// Blends `color` at `alpha` over every pixel of the full-width band
/// `y0..y1`.
fn shade_band(canvas: &mut RgbImage, y0: u32, y1: u32, color: Rgb<u8>, alpha: u8) {
    let a = alpha as u32;
    for y in y0..y1 {
        for x in 0..canvas.width() {
            let p = canvas.get_pixel_mut(x, y);
            for c in 0..3 {
                p.0[c] = ((color.0[c] as u32 * a + p.0[c] as u32 * (255 - a)) / 255) as u8;
            }
        }
    }
}
