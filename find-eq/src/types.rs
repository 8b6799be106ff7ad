mod price;
pub use price::*;

mod equilibrium;
pub use equilibrium::*;

mod market;
pub use market::*;
