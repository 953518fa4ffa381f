//! Screen resolution signal.

use super::{BrowserEnv, SignalProbe};

pub struct ResolutionProbe;

impl SignalProbe for ResolutionProbe {
    type Output = String;

    fn name(&self) -> &'static str {
        "resolution"
    }

    fn probe(&self, env: &BrowserEnv) -> Option<String> {
        let screen = env.window.screen().ok()?;
        let width = screen.width().ok()?;
        let height = screen.height().ok()?;
        Some(format_resolution(width, height))
    }
}

pub fn format_resolution(width: i32, height: i32) -> String {
    format!("{}x{}", width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(format_resolution(1920, 1080), "1920x1080");
    }
}
