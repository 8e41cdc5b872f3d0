use rand::distributions::uniform::SampleUniform;
use num_traits::Float;


/// All continuous types a probability distribution may be expressed in.
///
/// This trait gets implemented automatically for all types
/// that satisfy its dependent traits, most notably [f32] and [f64].

pub trait Real: Float + SampleUniform + std::iter::Sum + std::fmt::Debug + Send + Sync {}
impl<T: Float + SampleUniform + std::iter::Sum + std::fmt::Debug + Send + Sync> Real for T {}
