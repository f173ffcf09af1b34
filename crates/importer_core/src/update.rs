use crate::{ActiveJob, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged { source, text } => {
            let form = state.form_mut(source);
            if form.input() != text {
                form.set_input(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImportSubmitted { source } => {
            let form = state.form_mut(source);
            if form.is_pending() {
                return (state, Vec::new());
            }
            let submitted = form.begin_submit();
            state.mark_dirty();
            match submitted {
                Some(folder_url) => vec![Effect::SubmitImport { source, folder_url }],
                None => Vec::new(),
            }
        }
        Msg::ImportStarted { source, job_id } => {
            if state.registry().contains(&job_id) {
                return (state, Vec::new());
            }
            state.form_mut(source).accept(job_id.clone());
            state.mark_dirty();
            state.track(ActiveJob::new(job_id.clone(), source));
            vec![Effect::StartPolling { job_id }]
        }
        Msg::ImportFailed { source, error } => {
            state.form_mut(source).reject(error);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobStatusFetched { job_id, snapshot } => {
            if let Some(status) = state.status_mut(&job_id) {
                status.snapshot = Some(snapshot);
                status.transient_error = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobPollFailed { job_id, error } => {
            if let Some(status) = state.status_mut(&job_id) {
                status.transient_error = Some(error.message);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobCompleted { job_id } => {
            if state.untrack(&job_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobDismissed { job_id } => {
            if state.untrack(&job_id) {
                state.mark_dirty();
                vec![Effect::StopPolling { job_id }]
            } else {
                Vec::new()
            }
        }
        Msg::ShutdownRequested => {
            let ids: Vec<_> = state
                .registry()
                .list()
                .iter()
                .map(|entry| entry.id.clone())
                .collect();
            for id in &ids {
                state.untrack(id);
            }
            if !ids.is_empty() {
                state.mark_dirty();
            }
            ids.into_iter()
                .map(|job_id| Effect::StopPolling { job_id })
                .collect()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
