mod mock_quarter;
