use std::error::Error;

use qrforge::{ECLevel, MaskPattern, QRBuilder, Render, TextRender, Version};

fn main() -> Result<(), Box<dyn Error>> {
    let data = "This example shows all available configuration options for QR code generation.";

    let qr = QRBuilder::new(data.as_bytes())
        .min_version(Version::new(3)?) // Smallest version to consider - if not provided, starts at 1
        .ec_level(ECLevel::H) // Error correction level - if not provided, defaults to ECLevel::M
        .mask(MaskPattern::new(2)?) // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    let img = qr.to_image(6); // 6x scale factor for larger output
    img.save("configured_qr.png")?;

    println!("Configured QR code saved to: configured_qr.png");
    println!("QR metadata: {}", qr.metadata());

    let text = TextRender { module_size: 1, dark: '#', light: ' ' }.render(&qr);
    println!("{text}");

    Ok(())
}
