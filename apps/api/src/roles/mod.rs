// Role recommendation: suggestion client, role store, cache-aside orchestration
// and the HTTP handlers on top of them.

pub mod handlers;
pub mod prompts;
pub mod recommend;
pub mod store;
pub mod suggest;

#[cfg(test)]
pub mod testing;
