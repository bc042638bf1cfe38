use crate::chrome::{ChromeCommand, Viewport, WidthRegion};

/// Commands pinning the container, header and footer to the new viewport
/// width. Stateless: the same viewport always produces the same commands.
pub fn on_resize(viewport: Viewport) -> Vec<ChromeCommand> {
    [
        WidthRegion::Container,
        WidthRegion::Header,
        WidthRegion::Footer,
    ]
    .into_iter()
    .map(|region| ChromeCommand::SetRegionWidth {
        region,
        width: viewport.width,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resyncs_all_three_regions_in_document_order() {
        assert_eq!(
            on_resize(Viewport::new(1024, 700)),
            vec![
                ChromeCommand::SetRegionWidth {
                    region: WidthRegion::Container,
                    width: 1024,
                },
                ChromeCommand::SetRegionWidth {
                    region: WidthRegion::Header,
                    width: 1024,
                },
                ChromeCommand::SetRegionWidth {
                    region: WidthRegion::Footer,
                    width: 1024,
                },
            ],
        );
    }

    #[test]
    fn only_the_width_feeds_the_commands() {
        assert_eq!(
            on_resize(Viewport::new(900, 600)),
            on_resize(Viewport::new(900, 1200)),
        );
    }
}
