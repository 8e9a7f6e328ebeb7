use crate::foundation::error::{ProgressError, ProgressResult};

/// Straight (non-premultiplied) RGBA8 color parsed from CSS text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> ProgressResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex)
                .map_err(|e| ProgressError::validation(format!("invalid color '{s}': {e}")));
        }
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_func(body)
                .map_err(|e| ProgressError::validation(format!("invalid color '{s}': {e}")));
        }
        Err(ProgressError::validation(format!(
            "unsupported color syntax '{s}' (expected #hex, rgb() or rgba())"
        )))
    }

    /// Per-channel linear interpolation, rounded.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        let t = t.clamp(0.0, 1.0);
        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }

    /// CSS text: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.a) / 255.0;
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                (alpha * 1000.0).round() / 1000.0
            )
        }
    }
}

fn parse_hex(hex: &str) -> Result<Rgba8, String> {
    fn byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }
    fn nibble(c: &str) -> Result<u8, String> {
        let v = byte(c)?;
        Ok(v * 17)
    }

    if !hex.is_ascii() {
        return Err("hex color must be ascii".to_owned());
    }
    match hex.len() {
        3 => Ok(Rgba8::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        6 => Ok(Rgba8::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])?,
        }),
        _ => Err("hex color must be #rgb, #rrggbb or #rrggbbaa".to_owned()),
    }
}

fn parse_func(body: &str) -> Result<Rgba8, String> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err("expected 3 or 4 components".to_owned());
    }

    let channel = |p: &str| -> Result<u8, String> {
        let v: f64 = p.parse().map_err(|_| format!("invalid channel \"{p}\""))?;
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };
    let a = match parts.get(3) {
        Some(p) => {
            let v: f64 = p.parse().map_err(|_| format!("invalid alpha \"{p}\""))?;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };

    Ok(Rgba8 {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
