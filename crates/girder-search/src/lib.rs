// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Girder Search
//!
//! Search-level abstractions shared by the maximizer engines: the solution
//! value type, the monitor/callback machinery that observes and steers a
//! running search, a concurrent incumbent holder for multi-start runs, and
//! the result/statistics types a finished search reports.
//!
//! ## Modules
//!
//! - `solution`: A certified candidate — region, caller payload, and the
//!   interval bracketing the objective value at the candidate point.
//! - `monitor`: The `SearchMonitor` trait plus interrupt, progress,
//!   composite, and no-op implementations. Monitors are the only way to stop
//!   a search early; there are no built-in timeouts.
//! - `incumbent`: `SharedIncumbent`, a lock-free-read best-solution holder
//!   for sharing certified lower bounds across searches.
//! - `result`: `SearchResult` and `TerminationReason`.
//! - `stats`: Counters a search engine fills in as it runs.

pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod solution;
pub mod stats;
