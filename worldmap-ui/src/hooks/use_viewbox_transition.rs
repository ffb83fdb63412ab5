use crate::rendering::performance_now;
use leptos::*;
use leptos_use::utils::Pausable;
use leptos_use::{use_raf_fn_with_options, UseRafFnOptions};
use std::rc::Rc;
use worldmap_core::{ViewBox, ViewBoxTransition};

/// Displayed viewBox, eased towards the controller's target on each frame.
#[derive(Clone, Copy)]
pub struct ViewBoxAnimation {
    pub displayed: ReadSignal<ViewBox>,
    set_displayed: WriteSignal<ViewBox>,
    transition: StoredValue<Option<ViewBoxTransition>>,
    duration_ms: f64,
    resume: StoredValue<Rc<dyn Fn()>>,
}

pub fn use_viewbox_transition(initial: ViewBox, duration_ms: f64) -> ViewBoxAnimation {
    let (displayed, set_displayed) = create_signal(initial);
    let transition = store_value(None::<ViewBoxTransition>);
    let pause_loop = store_value(None::<Rc<dyn Fn()>>);

    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        move |_| {
            let Some(active) = transition.get_value() else {
                return;
            };
            let (viewbox, finished) = active.sample(performance_now());
            set_displayed.set(viewbox);
            if finished {
                transition.set_value(None);
                pause_loop.with_value(|pause| {
                    if let Some(pause) = pause {
                        pause();
                    }
                });
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    pause_loop.set_value(Some(Rc::new(pause)));

    ViewBoxAnimation {
        displayed,
        set_displayed,
        transition,
        duration_ms,
        resume: store_value(Rc::new(resume)),
    }
}

impl ViewBoxAnimation {
    /// Ease from whatever is on screen now to `target`. A transition already
    /// in flight is replaced, starting from its current sample.
    pub fn animate_to(&self, target: ViewBox) {
        let from = self.displayed.get_untracked();
        self.transition.set_value(Some(ViewBoxTransition::new(
            from,
            target,
            performance_now(),
            self.duration_ms,
        )));
        self.resume.with_value(|resume| resume());
    }

    /// Show `target` immediately, dropping any running transition.
    pub fn jump_to(&self, target: ViewBox) {
        self.transition.set_value(None);
        self.set_displayed.set(target);
    }
}
