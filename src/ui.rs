//! Score display and game-over indicator

/// Out-of-surface UI the session keeps in sync
pub trait Hud {
    /// Show the current score
    fn show_score(&mut self, score: u32);
    /// Show or hide the game-over indicator
    fn set_game_over(&mut self, visible: bool);
}

/// HUD that writes to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogHud {
    pub score: u32,
    pub game_over: bool,
}

impl Hud for LogHud {
    fn show_score(&mut self, score: u32) {
        if score != self.score {
            log::info!("Score: {}", score);
        }
        self.score = score;
    }

    fn set_game_over(&mut self, visible: bool) {
        if visible && !self.game_over {
            log::info!("GAME OVER (final score {})", self.score);
        }
        self.game_over = visible;
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomHud;

#[cfg(target_arch = "wasm32")]
mod dom {
    use web_sys::{Document, Element};

    use super::Hud;

    /// Class that hides an element
    const HIDDEN_CLASS: &str = "hidden";

    /// HUD backed by page elements: `#score` text and the `#gameOver` panel
    pub struct DomHud {
        score_el: Option<Element>,
        game_over_el: Option<Element>,
    }

    impl DomHud {
        pub fn new(document: &Document) -> Self {
            let score_el = document.get_element_by_id("score");
            let game_over_el = document.get_element_by_id("gameOver");
            if score_el.is_none() {
                log::warn!("No #score element, score will not be shown");
            }
            if game_over_el.is_none() {
                log::warn!("No #gameOver element, game over will not be shown");
            }
            Self {
                score_el,
                game_over_el,
            }
        }
    }

    impl Hud for DomHud {
        fn show_score(&mut self, score: u32) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn set_game_over(&mut self, visible: bool) {
            if let Some(el) = &self.game_over_el {
                let classes = el.class_list();
                let result = if visible {
                    classes.remove_1(HIDDEN_CLASS)
                } else {
                    classes.add_1(HIDDEN_CLASS)
                };
                if let Err(e) = result {
                    log::warn!("Failed to toggle game over panel: {:?}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_hud_tracks_state() {
        let mut hud = LogHud::default();
        hud.show_score(3);
        hud.set_game_over(true);
        assert_eq!(hud.score, 3);
        assert!(hud.game_over);
        hud.set_game_over(false);
        assert!(!hud.game_over);
    }
}
