mod pooling;
mod presence;
