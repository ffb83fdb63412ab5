use super::MapState;
use crate::rendering::performance_now;
use leptos::*;
use leptos_use::utils::Pausable;
use leptos_use::{use_raf_fn_with_options, UseRafFnOptions};
use std::rc::Rc;
use worldmap_core::FrameToken;

/// Animation-frame loop driving the globe's rotation.
#[derive(Clone, Copy)]
pub struct RotationControl {
    state: MapState,
    token: StoredValue<Option<FrameToken>>,
    resume: StoredValue<Rc<dyn Fn()>>,
    pause: StoredValue<Rc<dyn Fn()>>,
}

pub fn use_rotation(state: MapState) -> RotationControl {
    let token = store_value(None::<FrameToken>);
    let pause_loop = store_value(None::<Rc<dyn Fn()>>);

    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        move |_| {
            let Some(current) = token.get_value() else {
                return;
            };
            // A stale token means the run was stopped or replaced.
            if !state.tick(current, performance_now()) {
                token.set_value(None);
                pause_loop.with_value(|pause| {
                    if let Some(pause) = pause {
                        pause();
                    }
                });
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    let pause: Rc<dyn Fn()> = Rc::new(pause);
    pause_loop.set_value(Some(Rc::clone(&pause)));

    RotationControl {
        state,
        token,
        resume: store_value(Rc::new(resume)),
        pause: store_value(pause),
    }
}

impl RotationControl {
    pub fn toggle(&self) {
        // Cancel the current loop before a new run can start.
        self.pause.with_value(|pause| pause());
        let started = self.state.toggle_rotation(performance_now());
        self.token.set_value(started);
        if started.is_some() {
            self.resume.with_value(|resume| resume());
        }
    }
}
