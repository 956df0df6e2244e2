//! Maps a stage name, as given on the command line, to a constructor for
//! its [`Transform`](lp_stage::Transform).
//!
//! Stands in for spec §6's out-of-scope dynamic-loading mechanism: rather
//! than `dlopen`-ing a `<name>.so` image and pulling symbols out of it,
//! this resolves directly to a statically compiled transform. Names that
//! look like they were meant for the loader (end in `.so`) are rejected
//! with the same diagnostic spec §6 specifies for a missing module,
//! since no loader exists here to find them.

use crate::animated_printer::AnimatedPrinter;
use crate::expander::Expander;
use crate::flipper::Flipper;
use crate::logger::Logger;
use crate::printer::Printer;
use crate::rotator::Rotator;
use crate::uppercaser::Uppercaser;
use lp_core::Error;
use lp_stage::transform::Transform;

/// Builds the [`Transform`] named by a command-line stage argument.
///
/// Returns [`Error::ResolveError`] if `name` is unknown, or ends in
/// `.so` (a name meant for a loader this crate does not implement).
pub fn resolve(name: &str) -> Result<Box<dyn Transform>, Error> {
    if name.ends_with(".so") {
        return Err(Error::ResolveError(format!(
            "{name}: dynamic module loading is not supported"
        )));
    }
    let transform: Box<dyn Transform> = match name {
        "uppercaser" => Box::new(Uppercaser),
        "rotator" => Box::new(Rotator),
        "flipper" => Box::new(Flipper),
        "expander" => Box::new(Expander),
        "logger" => Box::new(Logger),
        "printer" => Box::new(Printer),
        "animated-printer" => Box::new(AnimatedPrinter),
        other => {
            return Err(Error::ResolveError(format!("{other}: no such stage")));
        }
    };
    Ok(transform)
}
