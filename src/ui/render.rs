use thiserror::Error;
use tracing::warn;

/// Font the stylized renderer draws with.
pub const FONT: &str = "standard";

#[derive(Debug, Error)]
#[error("stylized renderer unavailable: {0}")]
pub struct RendererUnavailable(pub String);

pub trait WordRenderer {
    fn render(&self, word: &str) -> String;
}

/// Plain text on its own line, used when large ASCII art is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRenderer;

impl WordRenderer for PlainRenderer {
    fn render(&self, word: &str) -> String {
        format!("\n{word}")
    }
}

#[cfg(feature = "figlet")]
pub struct StyledRenderer {
    font: figlet_rs::FIGfont,
}

#[cfg(feature = "figlet")]
impl StyledRenderer {
    pub fn standard() -> Result<Self, RendererUnavailable> {
        let font = figlet_rs::FIGfont::standard().map_err(RendererUnavailable)?;
        Ok(Self { font })
    }
}

#[cfg(feature = "figlet")]
impl WordRenderer for StyledRenderer {
    fn render(&self, word: &str) -> String {
        match self.font.convert(word) {
            Some(figure) => figure.to_string(),
            None => PlainRenderer.render(word),
        }
    }
}

/// Picks the renderer once at startup. Falling back to plain text is
/// logged here and never again.
pub fn detect(force_plain: bool) -> Box<dyn WordRenderer> {
    if force_plain {
        return Box::new(PlainRenderer);
    }
    match styled() {
        Ok(renderer) => renderer,
        Err(err) => {
            warn!("{err}; words will look nicer with the `figlet` feature and the {FONT} font");
            Box::new(PlainRenderer)
        }
    }
}

#[cfg(feature = "figlet")]
fn styled() -> Result<Box<dyn WordRenderer>, RendererUnavailable> {
    Ok(Box::new(StyledRenderer::standard()?))
}

#[cfg(not(feature = "figlet"))]
fn styled() -> Result<Box<dyn WordRenderer>, RendererUnavailable> {
    Err(RendererUnavailable(
        "built without the `figlet` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renderer_leads_with_blank_line() {
        assert_eq!(PlainRenderer.render("ocean"), "\nocean");
    }

    #[test]
    fn forced_plain_skips_detection() {
        let renderer = detect(true);
        assert_eq!(renderer.render("ocean"), "\nocean");
    }

    #[cfg(feature = "figlet")]
    #[test]
    fn styled_renderer_draws_multiline_art() {
        let renderer = StyledRenderer::standard().unwrap();
        let art = renderer.render("hi");
        assert!(art.lines().count() > 1);
        assert_ne!(art, "\nhi");
    }
}
