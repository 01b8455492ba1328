pub mod ranking;
pub mod rising_talent;
pub mod trending;
