mod helpers;
mod local;
