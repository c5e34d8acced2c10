pub mod clmm_math;
