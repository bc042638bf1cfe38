use crate::chrome::{ChromeCommand, DisplayState, HeaderPosition, HeaderSkin, Viewport};

/// Downward travel, in px, a single scroll event must cover before the header
/// collapses (or re-skins) and the badge hides. Filters out jitter.
pub const COLLAPSE_DELTA_PX: i64 = 20;

/// Upward travel, in px, a single scroll event must cover before the version
/// badge re-appears. The header itself docks on any upward movement.
pub const BADGE_REVEAL_DELTA_PX: i64 = 30;

/// Viewports narrower than this lose the header off-screen on downward
/// scroll; wider viewports keep it and only switch its skin.
pub const NARROW_VIEWPORT_PX: u32 = 1100;

/// Scroll-direction driver for the header and the version badge.
///
/// Holds the one piece of state the behavior needs: the offset seen by the
/// previous scroll event. Feeding it the next absolute offset yields the
/// style commands for that event and advances the state.
#[derive(Debug, Clone)]
pub struct Autohide {
    prev_offset: u64,
}

impl Autohide {
    /// `initial_offset` is the page's scroll position at the moment the
    /// handler attaches, so the first event sees a meaningful delta.
    pub fn new(initial_offset: u64) -> Self {
        Self {
            prev_offset: initial_offset,
        }
    }

    /// Offset recorded by the most recent event, or by construction.
    pub fn prev_offset(&self) -> u64 {
        self.prev_offset
    }

    /// Process one scroll event at `offset` under the current `viewport`.
    ///
    /// Commands are emitted for both regions whether or not the page has
    /// them; the applier drops commands for absent regions.
    pub fn on_scroll(&mut self, offset: u64, viewport: Viewport) -> Vec<ChromeCommand> {
        let delta = offset as i64 - self.prev_offset as i64;
        let mut commands = Vec::new();

        if delta < 0 {
            // Any upward movement restores the header; the badge needs more
            // travel before it comes back.
            commands.push(ChromeCommand::SetHeaderTop {
                position: HeaderPosition::Docked,
            });
            commands.push(ChromeCommand::SetHeaderDisplay {
                display: DisplayState::Shown,
            });
            commands.push(ChromeCommand::SetHeaderSkin {
                skin: HeaderSkin::Default,
            });
            if delta <= -BADGE_REVEAL_DELTA_PX {
                commands.push(ChromeCommand::SetBadgeDisplay {
                    display: DisplayState::Shown,
                });
            }
        } else if delta >= COLLAPSE_DELTA_PX {
            if viewport.width < NARROW_VIEWPORT_PX {
                commands.push(ChromeCommand::SetHeaderTop {
                    position: HeaderPosition::Offscreen,
                });
            } else {
                // Wide layouts never lose the header, it only changes skin.
                commands.push(ChromeCommand::SetHeaderSkin {
                    skin: HeaderSkin::Focused,
                });
            }
            commands.push(ChromeCommand::SetBadgeDisplay {
                display: DisplayState::Hidden,
            });
        }

        self.prev_offset = offset;
        commands
    }
}
