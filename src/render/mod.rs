mod export;
#[cfg(feature = "png")]
mod png;
mod report;

pub use self::export::*;
#[cfg(feature = "png")]
pub use self::png::*;
pub use self::report::*;

use crate::evaluation::Evaluation;
use crate::Result;

/// Consumer of a finished evaluation.
pub trait Renderer {
    fn render(&mut self, evaluation: &Evaluation) -> Result<()>;
}

/// Fans one evaluation out to several renderers, stopping at the first failure.
#[derive(Default)]
pub struct Renderers {
    renderers: Vec<Box<dyn Renderer>>,
}

impl Renderers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers.push(Box::new(renderer));
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Renderer for Renderers {
    fn render(&mut self, evaluation: &Evaluation) -> Result<()> {
        for renderer in self.renderers.iter_mut() {
            renderer.render(evaluation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::evaluation::{evaluate, Evaluation};
    use crate::model::SourceParameters;
    use crate::render::{Renderer, Renderers};
    use crate::Result;

    struct Counting(Rc<Cell<usize>>);

    impl Renderer for Counting {
        fn render(&mut self, _: &Evaluation) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct Failing;

    impl Renderer for Failing {
        fn render(&mut self, _: &Evaluation) -> Result<()> {
            Err(failure::err_msg("broken output"))
        }
    }

    #[test]
    fn every_renderer_sees_the_evaluation() {
        let calls = Rc::new(Cell::new(0));
        let mut renderers = Renderers::new();
        renderers.push(Counting(calls.clone()));
        renderers.push(Counting(calls.clone()));

        let evaluation = evaluate(&SourceParameters::default(), 2.5, 10).unwrap();
        renderers.render(&evaluation).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn first_failure_stops_the_chain() {
        let calls = Rc::new(Cell::new(0));
        let mut renderers = Renderers::new();
        renderers.push(Failing);
        renderers.push(Counting(calls.clone()));

        let evaluation = evaluate(&SourceParameters::default(), 2.5, 10).unwrap();
        assert!(renderers.render(&evaluation).is_err());
        assert_eq!(calls.get(), 0);
    }
}
