/// # Plot planner
/// decides from the free variables what kind of plot an expression gets and samples it
///# Example
/// ```
/// use RustedCalc::plotting::plot_planner::{plan_plot_text, SamplingDomain};
/// let plot = plan_plot_text("x**2+y**2-4", &SamplingDomain::default());
/// assert!(plot.is_contour());
/// assert_eq!(plot.title, "x**2+y**2-4 = 0");
/// ```
/// ________________________________________________________________________________________________
pub mod plot_planner;
/// marching squares over a sampled mesh
pub mod contour;
/// drawing plot descriptions with plotters
pub mod plots;
