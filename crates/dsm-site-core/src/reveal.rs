//! Scroll-triggered reveal animations.
//!
//! Observed elements are animated once, the first time they intersect the
//! viewport. Containers stagger their children; everything else animates
//! itself according to its class.

/// Elements handed to the intersection observer.
pub const OBSERVED_SELECTOR: &str = ".fade-in-up,.slide-left,.slide-right,#cards-container,#avisos-container,#maps-container .fade-in-up";

pub const THRESHOLD: f64 = 0.2;

/// What kind of observed element intersected.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealTarget {
    /// `#cards-container`: its links fade in one after another.
    CardsContainer,
    /// `#avisos-container`: its `div`s fade in one after another.
    AvisosContainer,
    /// Any element inside `#maps-container`, with its `data-delay`.
    MapItem { delay: Option<String> },
    /// Any other element, animated by class.
    Classed {
        fade_in_up: bool,
        slide_left: bool,
        slide_right: bool,
    },
}

impl RevealTarget {
    /// Selector for the children a container staggers.
    pub fn child_selector(&self) -> Option<&'static str> {
        match self {
            RevealTarget::CardsContainer => Some("a"),
            RevealTarget::AvisosContainer => Some("div"),
            _ => None,
        }
    }
}

/// Inline `animation` / `animation-delay` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub animation: &'static str,
    pub delay: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealPlan {
    /// One animation per child, in document order.
    Children(Vec<Animation>),
    /// Animate the target itself.
    Target(Animation),
    Nothing,
}

fn stagger(count: usize, step: f64) -> Vec<Animation> {
    (0..count)
        .map(|i| Animation {
            animation: "fadeInUp 0.6s forwards",
            delay: Some(format!("{}s", i as f64 * step)),
        })
        .collect()
}

/// Animation plan for `target`; `children` is the number of elements matching
/// its child selector.
pub fn plan(target: &RevealTarget, children: usize) -> RevealPlan {
    match target {
        RevealTarget::CardsContainer => RevealPlan::Children(stagger(children, 0.15)),
        RevealTarget::AvisosContainer => RevealPlan::Children(stagger(children, 0.2)),
        RevealTarget::MapItem { delay } => {
            let delay = delay
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("0");
            RevealPlan::Target(Animation {
                animation: "fadeInUp 0.8s forwards",
                delay: Some(format!("{delay}s")),
            })
        }
        RevealTarget::Classed {
            fade_in_up,
            slide_left,
            slide_right,
        } => {
            // Later classes override earlier ones.
            let animation = if *slide_right {
                "slideInRight 0.8s forwards"
            } else if *slide_left {
                "slideInLeft 0.8s forwards"
            } else if *fade_in_up {
                "fadeInUp 0.8s forwards"
            } else {
                return RevealPlan::Nothing;
            };
            RevealPlan::Target(Animation {
                animation,
                delay: None,
            })
        }
    }
}
