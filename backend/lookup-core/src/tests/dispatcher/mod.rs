mod simulated;
mod target;
