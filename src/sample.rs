use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const SAMPLE_CSS: &str = include_str!("sample.css");

/// Built-in Material-style page carrying every region the handlers touch:
/// sticky header, version badge, container and footer, with enough prose
/// that scroll offsets mean something.
pub fn sample_page() -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Sample Documentation" }
                style { (PreEscaped(SAMPLE_CSS)) }
            }
            body {
                header class="md-header" data-md-component="header" {
                    nav class="md-header-nav" {
                        span class="md-header-title" { "Sample Documentation" }
                    }
                }
                div class="md-container" {
                    main class="md-main" {
                        @for section in 1..=12u32 {
                            section class="md-section" {
                                h2 { "Section " (section) }
                                p {
                                    "Filler prose for section " (section)
                                    ", long enough that the page scrolls well past the header \
                                     and the badge has room to come and go."
                                }
                            }
                        }
                    }
                }
                footer class="md-footer" {
                    div class="md-footer-meta" { "Built-in sample page" }
                }
                div class="rst-versions rst-badge" {
                    span class="rst-current-version" { "v: latest" }
                }
            }
        }
    };
    markup.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::PageChrome as _;
    use crate::dom::DomChrome;

    #[test]
    fn sample_page_has_every_region() {
        let page = DomChrome::parse(&sample_page());
        assert!(page.header().is_some());
        assert!(page.version_badge().is_some());
        assert!(page.container().is_some());
        assert!(page.footer().is_some());
    }

    #[test]
    fn sample_page_defines_both_header_skins() {
        let html = sample_page();
        assert!(html.contains("--chrome-header-default"));
        assert!(html.contains("--chrome-header-focused"));
    }
}
