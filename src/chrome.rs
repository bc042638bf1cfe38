use serde::{Deserialize, Serialize};

/// Viewport assumed until the timeline says otherwise.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 800,
};

/// `top` value that slides the header off-screen: one header height, the way
/// the page stylesheet sizes it.
pub const HEADER_OFFSCREEN_TOP: &str = "-3rem";

pub const HEADER_SKIN_DEFAULT: &str = "var(--chrome-header-default)";
pub const HEADER_SKIN_FOCUSED: &str = "var(--chrome-header-focused)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPosition {
    Docked,
    Offscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Shown,
    Hidden,
}

impl DisplayState {
    fn css_value(self) -> &'static str {
        match self {
            DisplayState::Shown => "block",
            DisplayState::Hidden => "none",
        }
    }
}

/// Background treatment token for the header. The applier resolves the two
/// named variants to concrete styling; nothing else is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSkin {
    Default,
    Focused,
}

impl HeaderSkin {
    fn css_value(self) -> &'static str {
        match self {
            HeaderSkin::Default => HEADER_SKIN_DEFAULT,
            HeaderSkin::Focused => HEADER_SKIN_FOCUSED,
        }
    }
}

/// Regions whose width tracks the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthRegion {
    Container,
    Header,
    Footer,
}

/// One style mutation decided by the reactive handlers. Commands are applied
/// in order; a command whose region is missing from the page is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ChromeCommand {
    SetHeaderTop { position: HeaderPosition },
    SetHeaderDisplay { display: DisplayState },
    SetHeaderSkin { skin: HeaderSkin },
    SetBadgeDisplay { display: DisplayState },
    SetRegionWidth { region: WidthRegion, width: u32 },
}

/// Presentation-attribute sinks of a single page region.
pub trait RegionStyle {
    fn set_top(&self, value: &str);
    fn set_display(&self, value: &str);
    fn set_background_image(&self, value: &str);
    fn set_width_px(&self, width: u32);
}

/// The page regions the theme handlers touch. Lookups run per command, the
/// way the original handlers re-queried the document on every event; `None`
/// means the page simply lacks that region.
pub trait PageChrome {
    type Region: RegionStyle;

    fn header(&self) -> Option<Self::Region>;
    fn version_badge(&self) -> Option<Self::Region>;
    fn container(&self) -> Option<Self::Region>;
    fn footer(&self) -> Option<Self::Region>;
}

/// Which regions a page actually has; recorded once per replay.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChromePresence {
    pub header: bool,
    pub version_badge: bool,
    pub container: bool,
    pub footer: bool,
}

impl ChromePresence {
    pub fn of(chrome: &impl PageChrome) -> Self {
        Self {
            header: chrome.header().is_some(),
            version_badge: chrome.version_badge().is_some(),
            container: chrome.container().is_some(),
            footer: chrome.footer().is_some(),
        }
    }
}

/// Apply commands to the page, dropping the ones whose region is absent.
/// Returns how many commands found their region.
pub fn apply_commands(chrome: &impl PageChrome, commands: &[ChromeCommand]) -> usize {
    commands
        .iter()
        .filter(|command| apply_command(chrome, command))
        .count()
}

fn apply_command(chrome: &impl PageChrome, command: &ChromeCommand) -> bool {
    let region = match command {
        ChromeCommand::SetHeaderTop { .. }
        | ChromeCommand::SetHeaderDisplay { .. }
        | ChromeCommand::SetHeaderSkin { .. } => chrome.header(),
        ChromeCommand::SetBadgeDisplay { .. } => chrome.version_badge(),
        ChromeCommand::SetRegionWidth { region, .. } => match region {
            WidthRegion::Container => chrome.container(),
            WidthRegion::Header => chrome.header(),
            WidthRegion::Footer => chrome.footer(),
        },
    };
    let Some(region) = region else {
        return false;
    };

    match *command {
        ChromeCommand::SetHeaderTop { position } => region.set_top(match position {
            HeaderPosition::Docked => "0",
            HeaderPosition::Offscreen => HEADER_OFFSCREEN_TOP,
        }),
        ChromeCommand::SetHeaderDisplay { display } | ChromeCommand::SetBadgeDisplay { display } => {
            region.set_display(display.css_value())
        }
        ChromeCommand::SetHeaderSkin { skin } => region.set_background_image(skin.css_value()),
        ChromeCommand::SetRegionWidth { width, .. } => region.set_width_px(width),
    }
    true
}
