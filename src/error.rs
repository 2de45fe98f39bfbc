use custom_error::custom_error;

custom_error! {pub GeometryError
    NonInvertibleMatrix {description: String} = "Matrix is not invertible: {description}",
    DegenerateVector {description: String} = "Cannot normalize vector: {description}",
}

custom_error! {pub SceneError
    FailedToRead {description: String} = "Failed to read scene: {description}",
    FailedToParse {description: String} = "Failed to parse scene: {description}",
    InvalidScene {description: String} = "Invalid scene description: {description}",
    FailedToWrite {description: String} = "Failed to write image: {description}",
}

impl From<GeometryError> for SceneError {
    fn from(err: GeometryError) -> SceneError {
        SceneError::InvalidScene { description: err.to_string() }
    }
}
