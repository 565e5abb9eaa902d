use std::error::Error;

use qrforge::{encode, ECLevel};

fn main() -> Result<(), Box<dyn Error>> {
    // Smallest version that fits, best mask
    let qr = encode(b"Hello, World!", ECLevel::M, None)?;

    let img = qr.to_image(4); // 4x scale factor
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    println!("{}", qr.to_str(1));
    Ok(())
}
