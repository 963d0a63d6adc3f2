use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config;

/// How one animated section is observed and when its transition starts.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction, `0.0..=1.0`, that counts as having entered.
    pub threshold: f64,
    /// CSS margin around the viewport, e.g. `"50px"`.
    pub root_margin: String,
    /// Stagger handed to the renderer as `transition-delay`.
    pub delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: config::REVEAL_THRESHOLD,
            root_margin: config::REVEAL_ROOT_MARGIN.to_string(),
            delay_ms: 0,
        }
    }
}

impl RevealConfig {
    pub fn with_delay(delay_ms: u32) -> Self {
        Self { delay_ms, ..Self::default() }
    }
}

/// One report from the host about how much of a section is on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityChange {
    pub intersecting: bool,
    pub ratio: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn is_revealed(self) -> bool {
        self == RevealState::Revealed
    }

    /// `Revealed` is terminal: nothing moves a section back to `Hidden`.
    pub fn advance(self, change: VisibilityChange, threshold: f64) -> Self {
        match self {
            RevealState::Revealed => RevealState::Revealed,
            RevealState::Hidden if change.intersecting && change.ratio >= threshold => {
                RevealState::Revealed
            }
            RevealState::Hidden => RevealState::Hidden,
        }
    }
}

/// Something that can report visibility changes for a target.
///
/// `observe` returns `None` when the host has no way to watch visibility;
/// callers then treat the target as already visible. Dropping the returned
/// subscription stops the reports.
pub trait VisibilitySource {
    type Target: ?Sized;
    type Subscription;

    fn observe(
        &self,
        target: &Self::Target,
        config: &RevealConfig,
        on_change: Box<dyn FnMut(VisibilityChange)>,
    ) -> Option<Self::Subscription>;
}

/// The one-shot reveal for a single section.
pub struct RevealTrigger<S: VisibilitySource> {
    state: Rc<Cell<RevealState>>,
    _subscription: Option<S::Subscription>,
}

impl<S: VisibilitySource> RevealTrigger<S> {
    /// Starts observing `target`. `on_reveal` runs at most once, the first
    /// time a visibility report counts the section as visible. A section the
    /// host cannot observe starts out revealed; check `state` after attaching.
    pub fn attach<F>(source: &S, target: &S::Target, config: &RevealConfig, on_reveal: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let state = Rc::new(Cell::new(RevealState::Hidden));
        let pending = RefCell::new(Some(on_reveal));
        let threshold = config.threshold;

        let folded = state.clone();
        let subscription = source.observe(
            target,
            config,
            Box::new(move |change: VisibilityChange| {
                let state = folded.get().advance(change, threshold);
                folded.set(state);
                if state.is_revealed() {
                    if let Some(reveal) = pending.borrow_mut().take() {
                        reveal();
                    }
                }
            }),
        );

        if subscription.is_none() {
            warn!("Visibility observation unavailable, showing section without animation");
            state.set(RevealState::Revealed);
        }

        Self { state, _subscription: subscription }
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }
}

/// `IntersectionObserver` backed visibility reports.
pub struct IntersectionSource;

pub struct IntersectionSubscription {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for IntersectionSubscription {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl VisibilitySource for IntersectionSource {
    type Target = Element;
    type Subscription = IntersectionSubscription;

    fn observe(
        &self,
        target: &Element,
        config: &RevealConfig,
        mut on_change: Box<dyn FnMut(VisibilityChange)>,
    ) -> Option<IntersectionSubscription> {
        let window = web_sys::window()?;
        if !Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false) {
            return None;
        }

        let callback = Closure::wrap(Box::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    on_change(VisibilityChange {
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin);

        let created =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options);
        let observer = match created {
            Ok(observer) => observer,
            Err(e) => {
                warn!("Could not create IntersectionObserver: {:?}", e);
                return None;
            }
        };
        observer.observe(target);

        Some(IntersectionSubscription { observer, _callback: callback })
    }
}

/// Whether the element behind `node` has been scrolled into view. Once true
/// it stays true for the life of the component.
#[hook]
pub fn use_reveal(node: NodeRef, config: RevealConfig) -> bool {
    let revealed = use_state(|| false);

    {
        let setter = revealed.setter();
        use_effect_with_deps(
            move |(node, config)| {
                let trigger = match node.cast::<Element>() {
                    Some(element) => {
                        let on_reveal = setter.clone();
                        let trigger =
                            RevealTrigger::attach(&IntersectionSource, &element, config, move || {
                                on_reveal.set(true)
                            });
                        if trigger.state().is_revealed() {
                            setter.set(true);
                        }
                        Some(trigger)
                    }
                    None => {
                        debug!("Reveal target not mounted, showing it directly");
                        setter.set(true);
                        None
                    }
                };
                move || drop(trigger)
            },
            (node, config),
        );
    }

    *revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(ratio: f64) -> VisibilityChange {
        VisibilityChange { intersecting: ratio > 0.0, ratio }
    }

    fn gone() -> VisibilityChange {
        VisibilityChange { intersecting: false, ratio: 0.0 }
    }

    type Listener = Box<dyn FnMut(VisibilityChange)>;

    /// Visibility reports pushed by the test instead of a browser.
    #[derive(Default)]
    struct ScriptedSource {
        listeners: Rc<RefCell<Vec<Option<Listener>>>>,
        unsupported: bool,
    }

    struct ScriptedSubscription {
        listeners: Rc<RefCell<Vec<Option<Listener>>>>,
        slot: usize,
    }

    impl Drop for ScriptedSubscription {
        fn drop(&mut self) {
            self.listeners.borrow_mut()[self.slot] = None;
        }
    }

    impl ScriptedSource {
        fn emit(&self, slot: usize, change: VisibilityChange) {
            let mut listeners = self.listeners.borrow_mut();
            if let Some(listener) = listeners[slot].as_mut() {
                listener(change);
            }
        }

        fn active(&self) -> usize {
            self.listeners.borrow().iter().filter(|l| l.is_some()).count()
        }
    }

    impl VisibilitySource for ScriptedSource {
        type Target = str;
        type Subscription = ScriptedSubscription;

        fn observe(
            &self,
            _target: &str,
            _config: &RevealConfig,
            on_change: Box<dyn FnMut(VisibilityChange)>,
        ) -> Option<ScriptedSubscription> {
            if self.unsupported {
                return None;
            }
            let mut listeners = self.listeners.borrow_mut();
            listeners.push(Some(on_change));
            Some(ScriptedSubscription {
                listeners: self.listeners.clone(),
                slot: listeners.len() - 1,
            })
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let bump = count.clone();
        (count, move || bump.set(bump.get() + 1))
    }

    #[test]
    fn below_threshold_stays_hidden() {
        let state = RevealState::Hidden.advance(seen(0.05), 0.1);
        assert_eq!(state, RevealState::Hidden);
        let state = state.advance(VisibilityChange { intersecting: false, ratio: 0.5 }, 0.1);
        assert_eq!(state, RevealState::Hidden);
        assert!(RevealState::Hidden.advance(seen(0.1), 0.1).is_revealed());
    }

    #[test]
    fn revealed_never_goes_back() {
        let mut state = RevealState::Hidden;
        let script = [seen(0.02), seen(0.3), gone(), seen(0.01), gone(), gone()];
        let mut history = Vec::new();
        for change in script {
            state = state.advance(change, 0.1);
            history.push(state);
        }
        assert_eq!(history[0], RevealState::Hidden);
        assert!(history[1..].iter().all(|s| s.is_revealed()));
    }

    #[test]
    fn trigger_reveals_once_when_scrolled_in() {
        let source = ScriptedSource::default();
        let (calls, on_reveal) = counter();
        let trigger =
            RevealTrigger::attach(&source, "gifts", &RevealConfig::default(), on_reveal);
        assert_eq!(trigger.state(), RevealState::Hidden);

        source.emit(0, gone());
        assert_eq!(trigger.state(), RevealState::Hidden);
        source.emit(0, seen(0.4));
        source.emit(0, gone());
        source.emit(0, seen(1.0));

        assert_eq!(trigger.state(), RevealState::Revealed);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn sections_reveal_independently() {
        let source = ScriptedSource::default();
        let hero = RevealTrigger::attach(&source, "hero", &RevealConfig::default(), || {});
        let contact =
            RevealTrigger::attach(&source, "contact", &RevealConfig::with_delay(800), || {});

        source.emit(1, seen(0.5));
        assert_eq!(hero.state(), RevealState::Hidden);
        assert_eq!(contact.state(), RevealState::Revealed);
    }

    #[test]
    fn detaching_stops_observation() {
        let source = ScriptedSource::default();
        let (calls, on_reveal) = counter();
        let trigger =
            RevealTrigger::attach(&source, "dress-code", &RevealConfig::default(), on_reveal);
        assert_eq!(source.active(), 1);

        drop(trigger);
        assert_eq!(source.active(), 0);
        source.emit(0, seen(1.0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn detaching_after_reveal_also_stops_observation() {
        let source = ScriptedSource::default();
        let trigger = RevealTrigger::attach(&source, "hero", &RevealConfig::default(), || {});
        source.emit(0, seen(0.9));
        assert!(trigger.state().is_revealed());
        drop(trigger);
        assert_eq!(source.active(), 0);
    }

    #[test]
    fn missing_capability_fails_open() {
        let source = ScriptedSource { unsupported: true, ..ScriptedSource::default() };
        let (calls, on_reveal) = counter();
        let trigger =
            RevealTrigger::attach(&source, "countdown", &RevealConfig::default(), on_reveal);
        assert_eq!(trigger.state(), RevealState::Revealed);
        assert_eq!(source.active(), 0);
        // Nothing was reported, so the caller reads the state instead.
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn default_config_matches_page_defaults() {
        let config = RevealConfig::with_delay(400);
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.root_margin, "50px");
        assert_eq!(config.delay_ms, 400);
    }
}
