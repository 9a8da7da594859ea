mod report;

pub use report::{Location, NewReport, ProblemType, Report, UnknownProblemType};
