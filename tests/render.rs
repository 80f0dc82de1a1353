use ean13::{
    Alignment, Ean13Encoder, EncodedSymbol, ImageFormat, LayoutError, RenderConfig, SymbolInput,
    encode, encode_image, render_image, save_image,
};
use image::{DynamicImage, Rgba};
use pretty_assertions::assert_eq;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn isbn_symbol() -> EncodedSymbol {
    encode("97", "86005", "69175", Some("7")).unwrap()
}

fn pixel(image: &DynamicImage, x: u32, y: u32) -> Rgba<u8> {
    *image.as_rgba8().unwrap().get_pixel(x, y)
}

#[test]
fn default_canvas_size_includes_caption_band() {
    let image = render_image(&isbn_symbol(), &RenderConfig::default()).unwrap();
    assert_eq!((image.width(), image.height()), (600, 270));
}

#[test]
fn center_guard_reaches_below_data_bars() {
    // 600px / 95 modules = 6px each, 30px remainder, centre shift 15
    let image = render_image(&isbn_symbol(), &RenderConfig::default()).unwrap();

    // module 46 (center guard) covers x 291..297
    assert_eq!(pixel(&image, 292, 100), BLACK);
    assert_eq!(pixel(&image, 292, 255), BLACK);
    assert_eq!(pixel(&image, 292, 10), WHITE);

    // module 4 (first bar of the leading '7') covers x 39..45
    assert_eq!(pixel(&image, 41, 100), BLACK);
    assert_eq!(pixel(&image, 41, 249), BLACK);
    assert_eq!(pixel(&image, 41, 255), WHITE);

    // margins stay background
    assert_eq!(pixel(&image, 5, 100), WHITE);
    assert_eq!(pixel(&image, 595, 100), WHITE);
}

#[test]
fn labels_are_drawn_only_when_requested() {
    let has_ink_under_left_block = |image: &DynamicImage| {
        (252..266).any(|y| (40..280).any(|x| pixel(image, x, y) == BLACK))
    };

    let plain = render_image(&isbn_symbol(), &RenderConfig::default()).unwrap();
    assert!(!has_ink_under_left_block(&plain));

    let labelled = RenderConfig {
        show_label: true,
        ..RenderConfig::default()
    };
    let image = render_image(&isbn_symbol(), &labelled).unwrap();
    assert!(has_ink_under_left_block(&image));
}

#[test]
fn caption_is_drawn_in_the_top_band() {
    let config = RenderConfig {
        caption: Some("ISBN 978-600-569-175-7".into()),
        ..RenderConfig::default()
    };
    let image = render_image(&isbn_symbol(), &config).unwrap();
    let inked = (0..20).any(|y| (0..600).any(|x| pixel(&image, x, y) == BLACK));
    assert!(inked);
}

#[test]
fn right_alignment_pushes_bars_to_the_edge() {
    let config = RenderConfig {
        width: 600,
        alignment: Alignment::Right,
        ..RenderConfig::default()
    };
    let image = render_image(&isbn_symbol(), &config).unwrap();
    // end guard's last bar is module 94 -> x 594..600
    assert_eq!(pixel(&image, 599, 100), BLACK);
    assert_eq!(pixel(&image, 29, 100), WHITE);
}

#[test]
fn too_narrow_canvas_is_an_error() {
    let config = RenderConfig {
        width: 94,
        ..RenderConfig::default()
    };
    let err = render_image(&isbn_symbol(), &config).unwrap_err();
    assert_eq!(
        err,
        LayoutError::CanvasTooNarrow {
            width: 94,
            modules: 95
        }
    );
}

#[test]
fn quiet_zone_symbol_renders() {
    let input: SymbolInput = "400638133393".parse().unwrap();
    let symbol = Ean13Encoder::new().with_quiet_zone(true).encode(&input);
    let config = RenderConfig {
        width: 113 * 3,
        show_label: true,
        ..RenderConfig::default()
    };
    let image = render_image(&symbol, &config).unwrap();
    // 9 quiet modules at 3px: nothing but background before x = 27 in the bar area
    assert!((0..27).all(|x| pixel(&image, x, 100) == WHITE));
    assert_eq!(pixel(&image, 28, 100), BLACK);
}

#[test]
fn rendering_is_deterministic() {
    let config = RenderConfig {
        show_label: true,
        caption: Some("ISBN".into()),
        ..RenderConfig::default()
    };
    let first = encode_image(&render_image(&isbn_symbol(), &config).unwrap(), ImageFormat::Png);
    let second = encode_image(&render_image(&isbn_symbol(), &config).unwrap(), ImageFormat::Png);
    assert_eq!(first.unwrap(), second.unwrap());
}

#[test]
fn saved_png_reads_back() {
    let dir = std::env::temp_dir().join(format!("ean13-test-{}", std::process::id()));
    let path = dir.join("nested").join("barcode.png");
    let image = render_image(&isbn_symbol(), &RenderConfig::default()).unwrap();
    save_image(&image, &path, ImageFormat::Png).unwrap();

    let reloaded = image::open(&path).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (600, 270));
    assert_eq!(reloaded.to_rgba8().get_pixel(292, 255), &BLACK);
    std::fs::remove_dir_all(&dir).unwrap();
}
