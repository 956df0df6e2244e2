//! Composes named stages into a running pipeline and drives it through
//! its full lifecycle (spec §4.5): resolve, initialize, attach, feed,
//! quiesce, teardown, announce.

use lp_core::item::Item;
use lp_core::{log, Error};
use lp_stage::StageHandle;
use std::io::BufRead;

/// Runs one complete pipeline: `stage_names` composed in order, every
/// stage's queue sized `queue_capacity`, fed from `input`.
///
/// Returns `Ok(())` having already printed the shutdown banner on a
/// normal run. Returns `Err` for a resolve failure (caller should map to
/// exit code 1, usage on stdout) or an init/internal failure (caller
/// should map to exit code 2, no usage).
pub fn run<R: BufRead>(
    queue_capacity: usize,
    stage_names: &[String],
    input: R,
) -> Result<(), Error> {
    let mut stages = resolve(stage_names)?;

    if let Err(e) = initialize(&mut stages, queue_capacity) {
        return Err(e);
    }

    if let Err(e) = attach(&mut stages) {
        log::log_error("orchestrator", format!("attach failed: {e}"));
        teardown(&mut stages);
        return Err(Error::InternalError(e.to_string()));
    }

    feed(&stages, input);
    if let Err(e) = quiesce(&stages) {
        log::log_error("orchestrator", format!("wait_finished failed: {e}"));
        teardown(&mut stages);
        return Err(Error::InternalError(e.to_string()));
    }
    teardown(&mut stages);

    println!("Pipeline shutdown complete");
    Ok(())
}

/// Spec §4.5 step 1: obtains a stage handle per name. Name resolution
/// itself (mapping a name to a [`lp_stage::Transform`] constructor) is
/// delegated to `lp_stages::resolve`; this function only wraps each
/// resolved transform in a fresh, uninitialized [`StageHandle`].
fn resolve(
    stage_names: &[String],
) -> Result<Vec<(StageHandle, Option<Box<dyn lp_stage::Transform>>)>, Error> {
    stage_names
        .iter()
        .map(|name| {
            let transform = lp_stages::resolve(name)?;
            Ok((StageHandle::new(name.clone()), Some(transform)))
        })
        .collect()
}

/// Spec §4.5 step 2: initializes stages `0..k-1` in order. On any
/// failure, tears down every previously initialized stage in reverse
/// order before propagating the error.
fn initialize(
    stages: &mut [(StageHandle, Option<Box<dyn lp_stage::Transform>>)],
    queue_capacity: usize,
) -> Result<(), Error> {
    for i in 0..stages.len() {
        let (handle, transform) = &mut stages[i];
        let transform = transform.take().expect("resolve populates every slot");
        if let Err(e) = handle.init(queue_capacity, transform) {
            log::log_error("orchestrator", format!("stage {} failed to initialize: {e}", handle.name()));
            for (prev, _) in stages[..i].iter_mut().rev() {
                // These stages have a worker idling on an empty queue that
                // will never see `<END>`; wake it before `fini` so
                // `wait_finished` doesn't block forever.
                if let Err(cancel_err) = prev.cancel() {
                    log::log_error("orchestrator", format!("cleanup cancel failed: {cancel_err}"));
                }
                if let Err(fini_err) = prev.fini() {
                    log::log_error("orchestrator", format!("cleanup fini failed: {fini_err}"));
                }
            }
            return Err(Error::InitError(e.to_string()));
        }
    }
    Ok(())
}

/// Spec §4.5 step 3: wires `S[i]`'s downstream hook to `S[i+1]`'s
/// place-work, leaving the last stage terminal.
fn attach(stages: &mut [(StageHandle, Option<Box<dyn lp_stage::Transform>>)]) -> Result<(), Error> {
    let downstream_fns: Vec<Option<lp_stage::handle::Downstream>> = (0..stages.len())
        .map(|i| {
            if i + 1 < stages.len() {
                stages[i + 1].0.place_work_fn().map(Some)
            } else {
                Ok(None)
            }
        })
        .collect::<Result<_, Error>>()?;

    for ((handle, _), next) in stages.iter_mut().zip(downstream_fns) {
        handle.attach(next)?;
    }
    Ok(())
}

/// Spec §4.5 step 4: reads `input` and places each classified item on
/// the first stage's queue.
fn feed<R: BufRead>(stages: &[(StageHandle, Option<Box<dyn lp_stage::Transform>>)], input: R) {
    let head = &stages[0].0;
    let _ = crate::input::feed(input, |item: Item| head.place_work(item));
}

/// Spec §4.5 step 5: waits for every stage to drain, ascending order.
fn quiesce(stages: &[(StageHandle, Option<Box<dyn lp_stage::Transform>>)]) -> Result<(), Error> {
    for (handle, _) in stages {
        handle.wait_finished()?;
    }
    Ok(())
}

/// Spec §4.5 step 6: finalizes every stage, logging (not propagating)
/// any individual failure per spec §7's `FiniError` row.
///
/// Called both after a normal `quiesce` (every stage already finished via
/// the sentinel, so `cancel` below is a harmless no-op) and from the
/// attach/quiesce failure paths in `run`, where some stages may never
/// have seen `<END>` and would otherwise block `fini` forever.
fn teardown(stages: &mut [(StageHandle, Option<Box<dyn lp_stage::Transform>>)]) {
    for (handle, _) in stages.iter_mut() {
        if let Err(e) = handle.cancel() {
            log::log_error("orchestrator", format!("cancel failed for {}: {e}", handle.name()));
        }
        if let Err(e) = handle.fini() {
            log::log_error("orchestrator", format!("fini failed for {}: {e}", handle.name()));
        }
    }
}
