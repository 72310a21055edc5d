// Domain modules. Each owns its models, errors, and the functions the
// screens call; external collaborators come in through kernel::AppDeps.

pub mod auth;
pub mod lookup;
pub mod posts;
pub mod profile;
