pub mod quickhull;
