mod mock_ballots;
