use super::Point;

#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("line endpoints {0} and {1} are not distinct beyond epsilon")]
    DegenerateLine(Point, Point),
}
