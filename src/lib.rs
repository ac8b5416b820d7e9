#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod random;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, RenderConfig};
pub use ir::WordInput;
pub use layout::{FontWeight, Layout, LayoutEngine, PlacedWord, compute_layout};
pub use parser::parse_words;
pub use random::{RandomSource, SeededRng};
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to turn a word list into SVG in one call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Fixed seed for reproducible output; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            seed: None,
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> SeededRng {
        match self.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        }
    }

    /// Generator for render-time decorations. Seeded one past the layout
    /// seed so rotations never replay the placement draws.
    pub fn decoration_rng(&self) -> SeededRng {
        match self.seed {
            Some(seed) => SeededRng::new(seed.wrapping_add(1)),
            None => SeededRng::from_entropy(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parses `input` as a word list, lays it out and renders SVG.
/// An init directive in `input` overrides `options` for this call.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let (layout, config) = layout_with_options(input, &options)?;
    let mut rng = options.decoration_rng();
    Ok(render_svg(&layout, &config.theme, &mut rng))
}

/// Parses and lays out `input`, returning the layout and the effective
/// config after any init directive.
pub fn layout_with_options(
    input: &str,
    options: &RenderOptions,
) -> anyhow::Result<(Layout, config::Config)> {
    let parsed = parse_words(input)?;
    let mut config = config::Config {
        theme: options.theme.clone(),
        layout: options.layout.clone(),
        render: options.render.clone(),
    };
    if let Some(init) = parsed.init_config {
        config = config::merge_init_config(config, init);
    }
    let mut rng = options.rng();
    let layout = compute_layout(
        &parsed.words,
        config.render.width,
        config.render.height,
        &config.layout,
        &mut rng,
    );
    Ok((layout, config))
}

pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}
